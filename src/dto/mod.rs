use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Sign-up, login and session payloads.
pub mod auth;
/// Health check payload.
pub mod health;
/// Schedule payloads.
pub mod schedule;
/// User payloads.
pub mod user;
/// Shared validators and formatters.
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
