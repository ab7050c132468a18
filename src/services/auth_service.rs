//! Password hashing, account registration and the login/logout lifecycle of sessions.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

use crate::{
    dao::{models::NewUserEntity, storage::StorageError},
    dto::{
        auth::{LoginRequest, LoginResponse, SignupResponse},
        user::{NewUserRequest, UserSummary},
    },
    error::ServiceError,
    state::{Session, SessionUser, SharedState},
};

/// Shown when the confirmation password differs on the public sign-up form.
pub const SIGNUP_PASSWORD_MISMATCH: &str = "Passwords don't match.";
/// Shown when the confirmation password differs on the staff "new user" form.
pub const NEW_USER_PASSWORD_MISMATCH: &str =
    "Passwords don't match. Please enter the same password in both password fields";
/// Email already used by another account.
pub const ALREADY_REGISTERED: &str = "User already registered.";
/// Returned with the account created by sign-up.
pub const REGISTRATION_COMPLETE: &str = "Registration Complete. Please login to continue.";
/// Unknown email or wrong password; the two are not distinguished.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
/// Missing, unknown or expired session.
pub const LOGIN_REQUIRED: &str = "Please login to continue";
/// Where clients land after a successful login.
pub const AFTER_LOGIN_PATH: &str = "/schedules";

/// SHA-256 digest of `password`, lowercase hex.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Check `password` against a digest produced by [`hash_password`] in constant time.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let stored = stored_hash.to_ascii_lowercase();
    hash_password(password)
        .as_bytes()
        .ct_eq(stored.as_bytes())
        .into()
}

/// Persist a new account after checking the confirmation password and email uniqueness.
pub async fn register_user(
    state: &SharedState,
    request: NewUserRequest,
    mismatch_message: &str,
) -> Result<UserSummary, ServiceError> {
    if request.password != request.password2 {
        return Err(ServiceError::InvalidInput(mismatch_message.into()));
    }

    let store = state.require_roster_store().await?;
    if store
        .find_user_by_email(request.email.clone())
        .await?
        .is_some()
    {
        debug!(email = %request.email, "refusing duplicate registration");
        return Err(ServiceError::Conflict(ALREADY_REGISTERED.into()));
    }

    let entity = NewUserEntity {
        password_hash: hash_password(&request.password),
        firstname: request.firstname,
        lastname: request.lastname,
        email: request.email,
    };

    match store.insert_user(entity).await {
        Ok(user) => {
            info!(user_id = user.id, "user registered");
            Ok(user.into())
        }
        // Lost a race against a concurrent registration of the same email.
        Err(StorageError::Conflict { .. }) => {
            Err(ServiceError::Conflict(ALREADY_REGISTERED.into()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Public self-registration.
pub async fn signup(
    state: &SharedState,
    request: NewUserRequest,
) -> Result<SignupResponse, ServiceError> {
    let user = register_user(state, request, SIGNUP_PASSWORD_MISMATCH).await?;
    Ok(SignupResponse {
        user,
        message: REGISTRATION_COMPLETE.into(),
    })
}

/// Check the credentials and open a session. Returns the new token with the response body.
pub async fn login(
    state: &SharedState,
    request: LoginRequest,
) -> Result<(String, LoginResponse), ServiceError> {
    let store = state.require_roster_store().await?;
    let user = store
        .find_user_by_email(request.email)
        .await?
        .filter(|user| verify_password(&request.password, &user.password_hash))
        .ok_or_else(|| ServiceError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    let session_user = SessionUser::from(&user);
    let token = state.sessions().issue(session_user);
    info!(user_id = user.id, "session opened");

    Ok((
        token,
        LoginResponse {
            user: user.into(),
            redirect_to: AFTER_LOGIN_PATH.into(),
        },
    ))
}

/// Resolve the session bound to `token`; a missing token is treated like an unknown one.
pub fn authenticate(state: &SharedState, token: Option<&str>) -> Result<Session, ServiceError> {
    token
        .and_then(|token| state.sessions().resolve(token))
        .ok_or_else(|| ServiceError::Unauthorized(LOGIN_REQUIRED.into()))
}

/// Close the session bound to `token`.
pub fn logout(state: &SharedState, token: &str, user_id: i32) {
    if state.sessions().revoke(token) {
        info!(user_id, "session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_hex_sha256() {
        assert_eq!(
            hash_password("admin"),
            "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
        );
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn verifies_matching_password_only() {
        let stored = hash_password("s3cret");
        assert!(verify_password("s3cret", &stored));
        assert!(verify_password("s3cret", &stored.to_uppercase()));
        assert!(!verify_password("S3cret", &stored));
        assert!(!verify_password("s3cret", &stored[..40]));
        assert!(!verify_password("s3cret", ""));
    }
}
