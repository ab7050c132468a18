//! Process-local roster store used for development runs and tests.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::dao::{
    models::{NewScheduleEntity, NewUserEntity, ScheduleEntity, UserEntity},
    roster_store::RosterStore,
    storage::{StorageError, StorageResult},
};

/// In-memory implementation of [`RosterStore`] enforcing the same constraints as the
/// relational schema (unique email, schedules referencing an existing user).
#[derive(Clone, Default)]
pub struct MemoryRosterStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserEntity>,
    schedules: Vec<ScheduleEntity>,
    user_seq: i32,
    schedule_seq: i32,
}

impl MemoryRosterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert_user(&self, user: NewUserEntity) -> StorageResult<UserEntity> {
        let mut tables = self.inner.write().await;
        if tables.users.iter().any(|existing| existing.email == user.email) {
            return Err(StorageError::conflict(format!(
                "email `{}` already registered",
                user.email
            )));
        }

        tables.user_seq += 1;
        let entity = user.with_id(tables.user_seq);
        tables.users.push(entity.clone());
        Ok(entity)
    }

    async fn insert_schedule(&self, schedule: NewScheduleEntity) -> StorageResult<ScheduleEntity> {
        let mut tables = self.inner.write().await;
        if !tables.users.iter().any(|user| user.id == schedule.user_id) {
            return Err(StorageError::conflict(format!(
                "user {} does not exist",
                schedule.user_id
            )));
        }

        tables.schedule_seq += 1;
        let entity = schedule.with_id(tables.schedule_seq);
        tables.schedules.push(entity.clone());
        Ok(entity)
    }

    async fn list_user_schedules(&self, user_id: i32) -> Vec<ScheduleEntity> {
        let tables = self.inner.read().await;
        let mut schedules: Vec<_> = tables
            .schedules
            .iter()
            .filter(|schedule| schedule.user_id == user_id)
            .cloned()
            .collect();
        schedules.sort_by_key(|schedule| (schedule.day, schedule.start_at, schedule.id));
        schedules
    }
}

impl RosterStore for MemoryRosterStore {
    fn insert_user(&self, user: NewUserEntity) -> BoxFuture<'static, StorageResult<UserEntity>> {
        let store = self.clone();
        Box::pin(async move { store.insert_user(user).await })
    }

    fn find_user(&self, id: i32) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let tables = store.inner.read().await;
            Ok(tables.users.iter().find(|user| user.id == id).cloned())
        })
    }

    fn find_user_by_email(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let tables = store.inner.read().await;
            Ok(tables.users.iter().find(|user| user.email == email).cloned())
        })
    }

    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.read().await.users.clone()) })
    }

    fn insert_schedule(
        &self,
        schedule: NewScheduleEntity,
    ) -> BoxFuture<'static, StorageResult<ScheduleEntity>> {
        let store = self.clone();
        Box::pin(async move { store.insert_schedule(schedule).await })
    }

    fn list_schedules(&self) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.read().await.schedules.clone()) })
    }

    fn list_user_schedules(
        &self,
        user_id: i32,
    ) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.list_user_schedules(user_id).await) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
