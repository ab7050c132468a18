use crate::{
    dto::{
        schedule::ScheduleSummary,
        user::{NewUserRequest, UserSummary},
    },
    error::ServiceError,
    services::auth_service::{self, NEW_USER_PASSWORD_MISMATCH},
    state::SharedState,
};

fn unknown_user(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Incorrect user id: {id}"))
}

/// Every registered user.
pub async fn list_users(state: &SharedState) -> Result<Vec<UserSummary>, ServiceError> {
    let store = state.require_roster_store().await?;
    let users = store.list_users().await?;
    Ok(users.into_iter().map(UserSummary::from).collect())
}

/// One user by id, or `Incorrect user id`.
pub async fn get_user(state: &SharedState, id: i32) -> Result<UserSummary, ServiceError> {
    let store = state.require_roster_store().await?;
    store
        .find_user(id)
        .await?
        .map(UserSummary::from)
        .ok_or_else(|| unknown_user(id))
}

/// Staff-side account creation, same rules as the public sign-up.
pub async fn create_user(
    state: &SharedState,
    request: NewUserRequest,
) -> Result<UserSummary, ServiceError> {
    auth_service::register_user(state, request, NEW_USER_PASSWORD_MISMATCH).await
}

/// Weekly schedule of a single user, ordered by day then start time.
pub async fn user_schedules(
    state: &SharedState,
    id: i32,
) -> Result<Vec<ScheduleSummary>, ServiceError> {
    let store = state.require_roster_store().await?;
    if store.find_user(id).await?.is_none() {
        return Err(unknown_user(id));
    }

    let schedules = store.list_user_schedules(id).await?;
    Ok(schedules.into_iter().map(ScheduleSummary::from).collect())
}
