use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{
        HeaderMap, Method, Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
};
use mrcoffee_back::{
    build_router,
    config::AppConfig,
    dao::roster_store::memory::MemoryRosterStore,
    state::{AppState, SharedState},
};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    state: SharedState,
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

fn test_config() -> AppConfig {
    AppConfig {
        static_dir: None,
        ..AppConfig::default()
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

async fn spawn_app_with(config: AppConfig) -> TestApp {
    let state = AppState::with_store(config, Arc::new(MemoryRosterStore::new())).await;
    TestApp {
        router: build_router(state.clone()),
        state,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Reply {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should answer");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Reply {
            status,
            headers,
            body,
        }
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Reply {
        self.send(request(Method::GET, uri, None, cookie)).await
    }

    async fn post(&self, uri: &str, body: Value, cookie: Option<&str>) -> Reply {
        self.send(request(Method::POST, uri, Some(body), cookie))
            .await
    }

    async fn signup(&self, email: &str, password: &str) -> Reply {
        self.post(
            "/signup",
            json!({
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": email,
                "password": password,
                "password2": password,
            }),
            None,
        )
        .await
    }

    /// Sign up and log in, returning the `name=value` cookie pair.
    async fn logged_in(&self) -> String {
        let created = self.signup("ada@example.com", "engine").await;
        assert_eq!(created.status, StatusCode::CREATED);

        let reply = self
            .post(
                "/login",
                json!({"email": "ada@example.com", "password": "engine"}),
                None,
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        cookie_pair(&reply.headers)
    }
}

fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    }
}

fn set_cookie(headers: &HeaderMap) -> String {
    headers
        .get(SET_COOKIE)
        .expect("Set-Cookie should be present")
        .to_str()
        .expect("Set-Cookie should be ASCII")
        .to_string()
}

fn cookie_pair(headers: &HeaderMap) -> String {
    set_cookie(headers)
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn healthcheck_reports_storage_state() {
    let app = spawn_app().await;
    let reply = app.get("/healthcheck", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
    assert_eq!(reply.body["active_sessions"], 0);

    let degraded = build_router(AppState::new(test_config()));
    let response = degraded
        .oneshot(request(Method::GET, "/healthcheck", None, None))
        .await
        .expect("router should answer");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = spawn_app().await;

    for uri in ["/users", "/users/1", "/users/1/schedules", "/schedules", "/me", "/logout"] {
        let reply = app.get(uri, None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(reply.body["message"], "Please login to continue", "{uri}");
    }

    let forged = app.get("/users", Some("AuthToken=deadbeef")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let create = app
        .post(
            "/schedules",
            json!({"user_id": 1, "day": 1, "start_at": "08:00", "end_at": "12:00"}),
            None,
        )
        .await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_checks_passwords_and_duplicates() {
    let app = spawn_app().await;

    let mismatch = app
        .post(
            "/signup",
            json!({
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": "ada@example.com",
                "password": "one",
                "password2": "two",
            }),
            None,
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.body["message"], "Passwords don't match.");

    let created = app.signup("ada@example.com", "engine").await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["user"]["email"], "ada@example.com");
    assert_eq!(
        created.body["message"],
        "Registration Complete. Please login to continue."
    );
    assert!(created.body["user"].get("password").is_none());

    let duplicate = app.signup("ada@example.com", "other").await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["message"], "User already registered.");
}

#[tokio::test]
async fn signup_rejects_malformed_email() {
    let app = spawn_app().await;
    let reply = app.signup("not-an-email", "engine").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_issues_session_cookie() {
    let app = spawn_app().await;
    app.signup("ada@example.com", "engine").await;

    let wrong = app
        .post(
            "/login",
            json!({"email": "ada@example.com", "password": "steam"}),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], "Invalid username or password");
    assert!(wrong.headers.get(SET_COOKIE).is_none());

    let unknown = app
        .post(
            "/login",
            json!({"email": "nobody@example.com", "password": "engine"}),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

    let reply = app
        .post(
            "/login",
            json!({"email": "ada@example.com", "password": "engine"}),
            None,
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["redirect_to"], "/schedules");
    assert_eq!(reply.body["user"]["firstname"], "Ada");

    let cookie = set_cookie(&reply.headers);
    assert!(cookie.starts_with("AuthToken="));
    assert!(cookie.contains("HttpOnly"));
    let token = cookie_pair(&reply.headers)["AuthToken=".len()..].to_string();
    assert_eq!(token.len(), 60);
    assert_eq!(app.state.sessions().len(), 1);

    let me = app.get("/me", Some(&format!("AuthToken={token}"))).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["email"], "ada@example.com");
    assert!(me.body["issued_at"].as_str().is_some());
}

#[tokio::test]
async fn bearer_token_is_accepted() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;
    let token = cookie.trim_start_matches("AuthToken=");

    let reply = app
        .send(
            Request::builder()
                .uri("/me")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;

    let reply = app.get("/logout", Some(&cookie)).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert!(set_cookie(&reply.headers).contains("Max-Age=0"));
    assert!(app.state.sessions().is_empty());

    let after = app.get("/me", Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_manage_users() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;

    let mismatch = app
        .post(
            "/users",
            json!({
                "firstname": "Alan",
                "lastname": "Turing",
                "email": "alan@example.com",
                "password": "enigma",
                "password2": "bombe",
            }),
            Some(&cookie),
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        mismatch.body["message"],
        "Passwords don't match. Please enter the same password in both password fields"
    );

    let created = app
        .post(
            "/users",
            json!({
                "firstname": "Alan",
                "lastname": "Turing",
                "email": "alan@example.com",
                "password": "enigma",
                "password2": "enigma",
            }),
            Some(&cookie),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let alan_id = created.body["id"].as_i64().expect("id");

    let listed = app.get("/users", Some(&cookie)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let emails: Vec<_> = listed
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|user| user["email"].as_str().expect("email").to_string())
        .collect();
    assert_eq!(emails, vec!["ada@example.com", "alan@example.com"]);

    let single = app.get(&format!("/users/{alan_id}"), Some(&cookie)).await;
    assert_eq!(single.status, StatusCode::OK);
    assert_eq!(single.body["lastname"], "Turing");

    let missing = app.get("/users/99", Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Incorrect user id: 99");

    // The new account can log in on its own.
    let login = app
        .post(
            "/login",
            json!({"email": "alan@example.com", "password": "enigma"}),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn staff_manage_schedules() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;

    let bad_day = app
        .post(
            "/schedules",
            json!({"user_id": 1, "day": 8, "start_at": "08:00", "end_at": "12:00"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(bad_day.status, StatusCode::BAD_REQUEST);

    let bad_time = app
        .post(
            "/schedules",
            json!({"user_id": 1, "day": 1, "start_at": "8 o'clock", "end_at": "12:00"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(bad_time.status, StatusCode::BAD_REQUEST);

    let inverted = app
        .post(
            "/schedules",
            json!({"user_id": 1, "day": 1, "start_at": "14:00", "end_at": "09:00"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);
    assert_eq!(inverted.body["message"], "a shift must start before it ends");

    let unknown_user = app
        .post(
            "/schedules",
            json!({"user_id": 42, "day": 1, "start_at": "08:00", "end_at": "12:00"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(unknown_user.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_user.body["message"], "Incorrect user id: 42");

    for (day, start, end) in [(5, "13:00", "17:30"), (2, "07:00", "11:00")] {
        let created = app
            .post(
                "/schedules",
                json!({"user_id": 1, "day": day, "start_at": start, "end_at": end}),
                Some(&cookie),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["start_at"], start);
        assert_eq!(created.body["end_at"], end);
    }

    let all = app.get("/schedules", Some(&cookie)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().expect("array").len(), 2);
    assert_eq!(all.body[0]["day_name"], "Friday");

    let mine = app.get("/users/1/schedules", Some(&cookie)).await;
    assert_eq!(mine.status, StatusCode::OK);
    let days: Vec<_> = mine
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|schedule| schedule["day_name"].as_str().expect("day").to_string())
        .collect();
    assert_eq!(days, vec!["Tuesday", "Friday"]);

    let nobody = app.get("/users/7/schedules", Some(&cookie)).await;
    assert_eq!(nobody.status, StatusCode::NOT_FOUND);
    assert_eq!(nobody.body["message"], "Incorrect user id: 7");
}

#[tokio::test]
async fn degraded_mode_answers_service_unavailable() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;

    app.state.clear_roster_store().await;

    let users = app.get("/users", Some(&cookie)).await;
    assert_eq!(users.status, StatusCode::SERVICE_UNAVAILABLE);

    let signup = app.signup("grace@example.com", "cobol").await;
    assert_eq!(signup.status, StatusCode::SERVICE_UNAVAILABLE);

    // Sessions live in memory and survive a storage outage.
    let me = app.get("/me", Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn cleared_cookie_next_to_live_one_still_authenticates() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;

    let reply = app.get("/me", Some(&format!("AuthToken=; {cookie}"))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn session_ttl_bounds_cookie_and_session() {
    let mut config = test_config();
    config.session.ttl_secs = Some(1);
    let app = spawn_app_with(config).await;
    app.signup("ada@example.com", "engine").await;

    let login = app
        .post(
            "/login",
            json!({"email": "ada@example.com", "password": "engine"}),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(set_cookie(&login.headers).contains("Max-Age=1"));
    let cookie = cookie_pair(&login.headers);

    let fresh = app.get("/me", Some(&cookie)).await;
    assert_eq!(fresh.status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let stale = app.get("/users", Some(&cookie)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stale.body["message"], "Please login to continue");
    assert!(app.state.sessions().is_empty());
}

#[tokio::test]
async fn staff_cannot_register_an_existing_email() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;

    let duplicate = app
        .post(
            "/users",
            json!({
                "firstname": "Ada",
                "lastname": "Byron",
                "email": "ada@example.com",
                "password": "engine",
                "password2": "engine",
            }),
            Some(&cookie),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["message"], "User already registered.");

    let listed = app.get("/users", Some(&cookie)).await;
    assert_eq!(listed.body.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn schedule_times_drop_seconds() {
    let app = spawn_app().await;
    let cookie = app.logged_in().await;

    let created = app
        .post(
            "/schedules",
            json!({"user_id": 1, "day": 3, "start_at": "08:30:15", "end_at": "12:00:45"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["start_at"], "08:30");
    assert_eq!(created.body["end_at"], "12:00");

    let listed = app.get("/users/1/schedules", Some(&cookie)).await;
    assert_eq!(listed.body[0]["start_at"], "08:30");
    assert_eq!(listed.body[0]["end_at"], "12:00");
}

#[tokio::test]
async fn unclaimed_paths_fall_back_to_static_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("index.html"), "<h1>MrCoffee</h1>").expect("write page");

    let app = spawn_app_with(AppConfig {
        static_dir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    })
    .await;

    let page = app.get("/index.html", None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body, "<h1>MrCoffee</h1>");

    let missing = app.get("/nothing-here.css", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    // Routes still win over the fallback.
    let health = app.get("/healthcheck", None).await;
    assert_eq!(health.body["status"], "ok");
}
