use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::{
        schedule::ScheduleSummary,
        user::{NewUserRequest, UserSummary},
    },
    error::AppError,
    routes::auth::require_session,
    services::user_service,
    state::SharedState,
};

/// Staff user management, available to logged-in users only.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/schedules", get(get_user_schedules))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(("AuthToken" = String, Cookie, description = "Session token issued by /login")),
    responses((status = 200, description = "Every user", body = [UserSummary]))
)]
pub async fn list_users(
    State(state): State<SharedState>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    Ok(Json(user_service::list_users(&state).await?))
}

/// Register a colleague.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    params(("AuthToken" = String, Cookie, description = "Session token issued by /login")),
    request_body = NewUserRequest,
    responses(
        (status = 201, description = "User created", body = UserSummary),
        (status = 400, description = "Invalid input or passwords don't match"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<NewUserRequest>>,
) -> Result<(StatusCode, Json<UserSummary>), AppError> {
    let user = user_service::create_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("AuthToken" = String, Cookie, description = "Session token issued by /login"),
        ("id" = i32, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User", body = UserSummary),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> Result<Json<UserSummary>, AppError> {
    Ok(Json(user_service::get_user(&state, id).await?))
}

/// Weekly schedule of one user.
#[utoipa::path(
    get,
    path = "/users/{id}/schedules",
    tag = "users",
    params(
        ("AuthToken" = String, Cookie, description = "Session token issued by /login"),
        ("id" = i32, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Schedules ordered by day and start time", body = [ScheduleSummary]),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get_user_schedules(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ScheduleSummary>>, AppError> {
    Ok(Json(user_service::user_schedules(&state, id).await?))
}
