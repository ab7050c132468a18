/// Volatile store for development and tests.
pub mod memory;
/// Postgres-backed store.
#[cfg(feature = "postgres-store")]
pub mod postgres;

use futures::future::BoxFuture;

use crate::dao::models::{NewScheduleEntity, NewUserEntity, ScheduleEntity, UserEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the relational persistence layer for users and their schedules.
pub trait RosterStore: Send + Sync {
    /// Insert a user. A taken email is reported as [`StorageError::Conflict`].
    ///
    /// [`StorageError::Conflict`]: crate::dao::storage::StorageError::Conflict
    fn insert_user(&self, user: NewUserEntity) -> BoxFuture<'static, StorageResult<UserEntity>>;
    /// Fetch a user by primary key.
    fn find_user(&self, id: i32) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    /// Fetch a user by exact email.
    fn find_user_by_email(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    /// All users ordered by id.
    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>>;
    /// Insert a shift. An unknown `user_id` is reported as a conflict.
    fn insert_schedule(
        &self,
        schedule: NewScheduleEntity,
    ) -> BoxFuture<'static, StorageResult<ScheduleEntity>>;
    /// All shifts ordered by id.
    fn list_schedules(&self) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntity>>>;
    /// Shifts of one user ordered by day, then start time.
    fn list_user_schedules(
        &self,
        user_id: i32,
    ) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntity>>>;
    /// Round-trip to the backend to check it is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Rebuild the underlying connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
