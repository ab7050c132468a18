/// Password hashing, registration and session lifecycle.
pub mod auth_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Weekly schedule listing and creation.
pub mod schedule_service;
/// Session token transport over cookies and bearer headers.
pub mod session_cookie;
/// Background purge of expired sessions.
pub mod session_sweeper;
/// Storage connection supervisor driving degraded mode.
pub mod storage_supervisor;
/// Staff user records.
pub mod user_service;
