//! Payloads of the sign-up, login and session endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::{format_system_time, user::UserSummary},
    state::Session,
};

/// Credentials posted to `/login`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// Login identifier.
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    /// Plain-text password, checked against the stored digest.
    pub password: String,
}

/// Successful login: the session cookie is set alongside this body.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Account that logged in.
    pub user: UserSummary,
    /// Page the client should open next.
    pub redirect_to: String,
}

/// Account created through `/signup`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    /// Newly created account.
    pub user: UserSummary,
    /// Confirmation to show the user.
    pub message: String,
}

/// Identity bound to the presented session token.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Account owning the session.
    pub user: UserSummary,
    /// RFC 3339 timestamp of the login that created the session.
    pub issued_at: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            issued_at: format_system_time(session.issued_at_wall),
            user: session.user.into(),
        }
    }
}
