use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dao::models::ScheduleEntity,
    dto::validation::{day_name, format_clock_time, validate_clock_time},
};

/// Weekly shift to add to a user's schedule.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateScheduleRequest {
    /// User working the shift.
    pub user_id: i32,
    /// Day of the week, 1 (Monday) through 7 (Sunday).
    #[validate(range(min = 1, max = 7, message = "day must be between 1 (Monday) and 7 (Sunday)"))]
    pub day: i16,
    /// Shift start, `HH:MM` (24h).
    #[validate(custom(function = "validate_clock_time"))]
    pub start_at: String,
    /// Shift end, `HH:MM` (24h), after `start_at`.
    #[validate(custom(function = "validate_clock_time"))]
    pub end_at: String,
}

/// Schedule entry as returned by the API.
#[derive(Clone, Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct ScheduleSummary {
    /// Schedule identifier.
    pub id: i32,
    /// User working the shift.
    pub user_id: i32,
    /// Day of the week, 1 (Monday) through 7 (Sunday).
    pub day: i16,
    /// English name of `day`.
    pub day_name: String,
    /// Shift start, `HH:MM`.
    pub start_at: String,
    /// Shift end, `HH:MM`.
    pub end_at: String,
}

impl From<ScheduleEntity> for ScheduleSummary {
    fn from(schedule: ScheduleEntity) -> Self {
        Self {
            id: schedule.id,
            user_id: schedule.user_id,
            day: schedule.day,
            day_name: day_name(schedule.day).to_string(),
            start_at: format_clock_time(schedule.start_at),
            end_at: format_clock_time(schedule.end_at),
        }
    }
}
