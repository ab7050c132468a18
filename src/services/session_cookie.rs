//! Session token transport: reading the token from a request and rendering `Set-Cookie` values.

use axum::http::{
    HeaderMap,
    header::{AUTHORIZATION, COOKIE},
};
use cookie::{Cookie, SameSite, time::Duration};

use crate::config::SessionConfig;

/// Find the session token in the request: the session cookie first, then a bearer token.
///
/// Empty cookie values are skipped, so a cleared cookie sent next to a live one does not hide
/// the live token.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| cookie_value(header, cookie_name));
    if from_cookie.is_some() {
        return from_cookie;
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .map(str::to_string)
}

/// `Set-Cookie` value handing `token` to the browser.
pub fn session_cookie(config: &SessionConfig, token: &str) -> String {
    let mut cookie = base_cookie(config, token.to_string());
    if let Some(ttl) = config.ttl_secs {
        cookie.set_max_age(Duration::seconds(i64::try_from(ttl).unwrap_or(i64::MAX)));
    }
    cookie.to_string()
}

/// `Set-Cookie` value making the browser drop the session cookie.
pub fn expired_cookie(config: &SessionConfig) -> String {
    let mut cookie = base_cookie(config, String::new());
    cookie.set_max_age(Duration::ZERO);
    cookie.to_string()
}

fn base_cookie(config: &SessionConfig, value: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .build()
}

/// First non-empty value of the cookie called `name` in a `Cookie` header.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .filter(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().trim_matches('"').to_string())
        .find(|value| !value.is_empty())
}

fn parse_bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn reads_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; AuthToken=abc123 ; lang=fr"),
        );

        assert_eq!(
            extract_token(&headers, "AuthToken").as_deref(),
            Some("abc123")
        );
        assert_eq!(extract_token(&headers, "Missing"), None);
    }

    #[test]
    fn empty_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("AuthToken="));
        assert_eq!(extract_token(&headers, "AuthToken"), None);
    }

    #[test]
    fn cleared_cookie_does_not_hide_live_one() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("AuthToken=; AuthToken=abc123"));
        assert_eq!(
            extract_token(&headers, "AuthToken").as_deref(),
            Some("abc123")
        );

        let mut split = HeaderMap::new();
        split.append(COOKIE, HeaderValue::from_static("AuthToken="));
        split.append(COOKIE, HeaderValue::from_static("AuthToken=def456"));
        assert_eq!(
            extract_token(&split, "AuthToken").as_deref(),
            Some("def456")
        );
    }

    #[test]
    fn falls_back_to_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_token(&headers, "AuthToken").as_deref(), Some("tok"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_token(&headers, "AuthToken"), None);
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("AuthToken=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(
            extract_token(&headers, "AuthToken").as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn renders_cookie_attributes() {
        let mut config = SessionConfig::default();
        let plain = session_cookie(&config, "t0k");
        assert!(plain.starts_with("AuthToken=t0k;"));
        for attribute in ["Path=/", "HttpOnly", "SameSite=Lax"] {
            assert!(plain.contains(attribute), "{plain} lacks {attribute}");
        }
        assert!(!plain.contains("Max-Age"));
        assert!(!plain.contains("Secure"));

        config.ttl_secs = Some(60);
        config.secure_cookie = true;
        let lasting = session_cookie(&config, "t0k");
        assert!(lasting.contains("Max-Age=60"));
        assert!(lasting.contains("Secure"));

        let expired = expired_cookie(&config);
        assert!(expired.starts_with("AuthToken=;"));
        assert!(expired.contains("Max-Age=0"));
    }
}
