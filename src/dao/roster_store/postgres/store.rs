use std::sync::Arc;

use futures::future::BoxFuture;
use sqlx::PgPool;
use tokio::sync::RwLock;

use super::{
    config::PostgresConfig,
    connection::{establish_pool, ping},
    error::{PostgresDaoError, PostgresResult},
    models::{SCHEDULE_COLUMNS, USER_COLUMNS, schedule_from_row, user_from_row},
    schema::ensure_schema,
};
use crate::dao::{
    models::{NewScheduleEntity, NewUserEntity, ScheduleEntity, UserEntity},
    roster_store::RosterStore,
    storage::StorageResult,
};

/// [`RosterStore`] backed by a Postgres pool that can be swapped on reconnect.
#[derive(Clone)]
pub struct PostgresRosterStore {
    inner: Arc<PostgresInner>,
}

struct PostgresInner {
    pool: RwLock<PgPool>,
    config: PostgresConfig,
}

impl PostgresInner {
    async fn ping(&self) -> PostgresResult<()> {
        let pool = self.pool.read().await.clone();
        ping(&pool)
            .await
            .map_err(|source| PostgresDaoError::HealthPing { source })
    }

    async fn reconnect(&self) -> PostgresResult<()> {
        let pool = establish_pool(&self.config).await?;
        let previous = {
            let mut guard = self.pool.write().await;
            std::mem::replace(&mut *guard, pool)
        };
        previous.close().await;
        Ok(())
    }
}

impl PostgresRosterStore {
    /// Connect to Postgres and make sure the roster tables exist.
    pub async fn connect(config: PostgresConfig) -> PostgresResult<Self> {
        let pool = establish_pool(&config).await?;
        ensure_schema(&pool).await?;

        Ok(Self {
            inner: Arc::new(PostgresInner {
                pool: RwLock::new(pool),
                config,
            }),
        })
    }

    async fn pool(&self) -> PgPool {
        self.inner.pool.read().await.clone()
    }

    async fn insert_user(&self, user: NewUserEntity) -> PostgresResult<UserEntity> {
        let pool = self.pool().await;
        let query = format!(
            "INSERT INTO users (firstname, lastname, email, password) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(&user.firstname)
            .bind(&user.lastname)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&pool)
            .await
            .map_err(|source| PostgresDaoError::InsertUser {
                email: user.email.clone(),
                source,
            })?;

        user_from_row(&row).map_err(|source| PostgresDaoError::InsertUser {
            email: user.email,
            source,
        })
    }

    async fn find_user(&self, id: i32) -> PostgresResult<Option<UserEntity>> {
        let pool = self.pool().await;
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(|source| PostgresDaoError::LoadUser { id, source })?;

        row.as_ref()
            .map(user_from_row)
            .transpose()
            .map_err(|source| PostgresDaoError::LoadUser { id, source })
    }

    async fn find_user_by_email(&self, email: String) -> PostgresResult<Option<UserEntity>> {
        let pool = self.pool().await;
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query(&query)
            .bind(&email)
            .fetch_optional(&pool)
            .await
            .map_err(|source| PostgresDaoError::LoadUserByEmail { source })?;

        row.as_ref()
            .map(user_from_row)
            .transpose()
            .map_err(|source| PostgresDaoError::LoadUserByEmail { source })
    }

    async fn list_users(&self) -> PostgresResult<Vec<UserEntity>> {
        let pool = self.pool().await;
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");

        let rows = sqlx::query(&query)
            .fetch_all(&pool)
            .await
            .map_err(|source| PostgresDaoError::ListUsers { source })?;

        rows.iter()
            .map(user_from_row)
            .collect::<Result<_, _>>()
            .map_err(|source| PostgresDaoError::ListUsers { source })
    }

    async fn insert_schedule(&self, schedule: NewScheduleEntity) -> PostgresResult<ScheduleEntity> {
        let pool = self.pool().await;
        let user_id = schedule.user_id;
        let query = format!(
            "INSERT INTO schedules (user_id, day, start_at, end_at) \
             VALUES ($1, $2, $3, $4) RETURNING {SCHEDULE_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(schedule.user_id)
            .bind(schedule.day)
            .bind(schedule.start_at)
            .bind(schedule.end_at)
            .fetch_one(&pool)
            .await
            .map_err(|source| PostgresDaoError::InsertSchedule { user_id, source })?;

        schedule_from_row(&row)
            .map_err(|source| PostgresDaoError::InsertSchedule { user_id, source })
    }

    async fn list_schedules(&self) -> PostgresResult<Vec<ScheduleEntity>> {
        let pool = self.pool().await;
        let query = format!("SELECT {SCHEDULE_COLUMNS} FROM schedules ORDER BY id");

        let rows = sqlx::query(&query)
            .fetch_all(&pool)
            .await
            .map_err(|source| PostgresDaoError::ListSchedules { source })?;

        rows.iter()
            .map(schedule_from_row)
            .collect::<Result<_, _>>()
            .map_err(|source| PostgresDaoError::ListSchedules { source })
    }

    async fn list_user_schedules(&self, user_id: i32) -> PostgresResult<Vec<ScheduleEntity>> {
        let pool = self.pool().await;
        let query = format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE user_id = $1 \
             ORDER BY day, start_at, id"
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&pool)
            .await
            .map_err(|source| PostgresDaoError::ListUserSchedules { user_id, source })?;

        rows.iter()
            .map(schedule_from_row)
            .collect::<Result<_, _>>()
            .map_err(|source| PostgresDaoError::ListUserSchedules { user_id, source })
    }
}

impl RosterStore for PostgresRosterStore {
    fn insert_user(&self, user: NewUserEntity) -> BoxFuture<'static, StorageResult<UserEntity>> {
        let store = self.clone();
        Box::pin(async move { store.insert_user(user).await.map_err(Into::into) })
    }

    fn find_user(&self, id: i32) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_user(id).await.map_err(Into::into) })
    }

    fn find_user_by_email(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_user_by_email(email).await.map_err(Into::into) })
    }

    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_users().await.map_err(Into::into) })
    }

    fn insert_schedule(
        &self,
        schedule: NewScheduleEntity,
    ) -> BoxFuture<'static, StorageResult<ScheduleEntity>> {
        let store = self.clone();
        Box::pin(async move { store.insert_schedule(schedule).await.map_err(Into::into) })
    }

    fn list_schedules(&self) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_schedules().await.map_err(Into::into) })
    }

    fn list_user_schedules(
        &self,
        user_id: i32,
    ) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_user_schedules(user_id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
