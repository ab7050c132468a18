use axum::{
    Json, Router,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode, header::SET_COOKIE, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, SessionResponse, SignupResponse},
        user::NewUserRequest,
    },
    error::AppError,
    services::{
        auth_service::{self, LOGIN_REQUIRED},
        session_cookie::{expired_cookie, extract_token, session_cookie},
    },
    state::{Session, SharedState},
};

/// Session attached to a request by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentSession {
    /// Token the request authenticated with.
    pub token: String,
    /// Session the token resolved to.
    pub session: Session,
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(LOGIN_REQUIRED.into()))
    }
}

/// Routes reachable without a session.
pub fn public_router() -> Router<SharedState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Session management routes that need a logged-in user.
pub fn session_router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/logout", get(logout).post(logout))
        .route("/me", get(current_session))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body = NewUserRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid input or passwords don't match"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<NewUserRequest>>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let created = auth_service::signup(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Exchange credentials for a session cookie.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; `Set-Cookie` carries the session token", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<LoginRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let (token, body) = auth_service::login(&state, payload).await?;
    let cookie = session_cookie(&state.config().session, &token);
    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// Close the current session and clear the cookie.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    params(("AuthToken" = String, Cookie, description = "Session token issued by /login")),
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "No valid session")
    )
)]
pub async fn logout(State(state): State<SharedState>, current: CurrentSession) -> impl IntoResponse {
    auth_service::logout(&state, &current.token, current.session.user.id);
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, expired_cookie(&state.config().session))],
    )
}

/// Describe the user bound to the presented session.
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    params(("AuthToken" = String, Cookie, description = "Session token issued by /login")),
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "No valid session")
    )
)]
pub async fn current_session(current: CurrentSession) -> Json<SessionResponse> {
    Json(current.session.into())
}

/// Reject requests without a live session and expose the session to downstream handlers.
pub async fn require_session(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers(), &state.config().session.cookie_name)
        .ok_or_else(|| AppError::Unauthorized(LOGIN_REQUIRED.into()))?;
    let session = auth_service::authenticate(&state, Some(&token))?;

    req.extensions_mut()
        .insert(CurrentSession { token, session });
    Ok(next.run(req).await)
}
