use tracing::info;

use crate::{
    dao::{models::NewScheduleEntity, storage::StorageError},
    dto::{
        schedule::{CreateScheduleRequest, ScheduleSummary},
        validation::parse_clock_time,
    },
    error::ServiceError,
    state::SharedState,
};

/// Every shift of every user.
pub async fn list_schedules(state: &SharedState) -> Result<Vec<ScheduleSummary>, ServiceError> {
    let store = state.require_roster_store().await?;
    let schedules = store.list_schedules().await?;
    Ok(schedules.into_iter().map(ScheduleSummary::from).collect())
}

/// Add a shift to a user's week. The shift must start before it ends.
pub async fn create_schedule(
    state: &SharedState,
    request: CreateScheduleRequest,
) -> Result<ScheduleSummary, ServiceError> {
    let start_at = parse_clock_time(&request.start_at).ok_or_else(|| {
        ServiceError::InvalidInput(format!("`{}` is not a HH:MM time", request.start_at))
    })?;
    let end_at = parse_clock_time(&request.end_at).ok_or_else(|| {
        ServiceError::InvalidInput(format!("`{}` is not a HH:MM time", request.end_at))
    })?;
    if start_at >= end_at {
        return Err(ServiceError::InvalidInput(
            "a shift must start before it ends".into(),
        ));
    }
    if !(1..=7).contains(&request.day) {
        return Err(ServiceError::InvalidInput(
            "day must be between 1 (Monday) and 7 (Sunday)".into(),
        ));
    }

    let store = state.require_roster_store().await?;
    let unknown_user = || ServiceError::NotFound(format!("Incorrect user id: {}", request.user_id));
    if store.find_user(request.user_id).await?.is_none() {
        return Err(unknown_user());
    }

    let entity = NewScheduleEntity {
        user_id: request.user_id,
        day: request.day,
        start_at,
        end_at,
    };

    match store.insert_schedule(entity).await {
        Ok(schedule) => {
            info!(
                schedule_id = schedule.id,
                user_id = schedule.user_id,
                day = schedule.day,
                "schedule created"
            );
            Ok(schedule.into())
        }
        // The user vanished between the lookup and the insert.
        Err(StorageError::Conflict { .. }) => Err(unknown_user()),
        Err(err) => Err(err.into()),
    }
}
