use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for MrCoffee Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::current_session,
        crate::routes::users::list_users,
        crate::routes::users::create_user,
        crate::routes::users::get_user,
        crate::routes::users::get_user_schedules,
        crate::routes::schedules::list_schedules,
        crate::routes::schedules::create_schedule,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::auth::LoginRequest,
            crate::dto::auth::LoginResponse,
            crate::dto::auth::SignupResponse,
            crate::dto::auth::SessionResponse,
            crate::dto::user::NewUserRequest,
            crate::dto::user::UserSummary,
            crate::dto::schedule::CreateScheduleRequest,
            crate::dto::schedule::ScheduleSummary,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Sign-up, login and session management"),
        (name = "users", description = "Staff user records"),
        (name = "schedules", description = "Weekly schedule entries"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/signup",
            "/login",
            "/logout",
            "/me",
            "/users",
            "/users/{id}",
            "/users/{id}/schedules",
            "/schedules",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
