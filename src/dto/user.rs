use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dao::models::UserEntity, state::SessionUser};

/// Account details submitted on sign-up or when staff register a colleague.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct NewUserRequest {
    /// Given name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub firstname: String,
    /// Family name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub lastname: String,
    /// Login identifier, unique across accounts.
    #[validate(email(message = "email address is malformed"))]
    pub email: String,
    /// Plain-text password; only its digest is stored.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Confirmation, must repeat `password`.
    pub password2: String,
}

/// Public projection of a user; the password hash is never exposed.
#[derive(Clone, Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct UserSummary {
    /// User identifier.
    pub id: i32,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Login identifier.
    pub email: String,
}

impl From<UserEntity> for UserSummary {
    fn from(user: UserEntity) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
        }
    }
}

impl From<SessionUser> for UserSummary {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
        }
    }
}
