use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::schedule::{CreateScheduleRequest, ScheduleSummary},
    error::AppError,
    routes::auth::require_session,
    services::schedule_service,
    state::SharedState,
};

/// Weekly schedules of all staff, available to logged-in users only.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/schedules", get(list_schedules).post(create_schedule))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// List every schedule entry.
#[utoipa::path(
    get,
    path = "/schedules",
    tag = "schedules",
    params(("AuthToken" = String, Cookie, description = "Session token issued by /login")),
    responses((status = 200, description = "Every schedule entry", body = [ScheduleSummary]))
)]
pub async fn list_schedules(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ScheduleSummary>>, AppError> {
    Ok(Json(schedule_service::list_schedules(&state).await?))
}

/// Add a shift to a user's week.
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "schedules",
    params(("AuthToken" = String, Cookie, description = "Session token issued by /login")),
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleSummary),
        (status = 400, description = "Invalid day or times"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn create_schedule(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateScheduleRequest>>,
) -> Result<(StatusCode, Json<ScheduleSummary>), AppError> {
    let schedule = schedule_service::create_schedule(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}
