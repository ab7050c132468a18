use sqlx::{Row, postgres::PgRow};

use crate::dao::models::{ScheduleEntity, UserEntity};

pub const USER_COLUMNS: &str = "id, firstname, lastname, email, password";
pub const SCHEDULE_COLUMNS: &str = "id, user_id, day, start_at, end_at";

pub fn user_from_row(row: &PgRow) -> Result<UserEntity, sqlx::Error> {
    Ok(UserEntity {
        id: row.try_get("id")?,
        firstname: row.try_get("firstname")?,
        lastname: row.try_get("lastname")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password")?,
    })
}

pub fn schedule_from_row(row: &PgRow) -> Result<ScheduleEntity, sqlx::Error> {
    Ok(ScheduleEntity {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        day: row.try_get("day")?,
        start_at: row.try_get("start_at")?,
        end_at: row.try_get("end_at")?,
    })
}
