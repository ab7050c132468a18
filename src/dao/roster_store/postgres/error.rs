use thiserror::Error;

/// Result alias for Postgres operations.
pub type PostgresResult<T> = Result<T, PostgresDaoError>;

/// Failures of the Postgres store, each carrying the driver error.
#[derive(Debug, Error)]
pub enum PostgresDaoError {
    /// `DATABASE_URL` could not be parsed.
    #[error("invalid Postgres URL `{url}`")]
    InvalidUrl {
        /// URL with the password redacted.
        url: String,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// The database never answered during startup.
    #[error("failed to reach Postgres after {attempts} attempt(s)")]
    InitialPing {
        /// Connection attempts made.
        attempts: u32,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Creating a table failed.
    #[error("failed to ensure table `{table}`")]
    EnsureSchema {
        /// Table being created.
        table: &'static str,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Periodic liveness query failed.
    #[error("health ping failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// User insert rejected or failed.
    #[error("failed to insert user `{email}`")]
    InsertUser {
        /// Email of the rejected user.
        email: String,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// User lookup by id failed.
    #[error("failed to load user {id}")]
    LoadUser {
        /// Requested user id.
        id: i32,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// User lookup by email failed.
    #[error("failed to look up user by email")]
    LoadUserByEmail {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Listing users failed.
    #[error("failed to list users")]
    ListUsers {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Schedule insert rejected or failed.
    #[error("failed to insert schedule for user {user_id}")]
    InsertSchedule {
        /// Owner of the schedule.
        user_id: i32,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Listing schedules failed.
    #[error("failed to list schedules")]
    ListSchedules {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Listing one user's schedules failed.
    #[error("failed to list schedules of user {user_id}")]
    ListUserSchedules {
        /// Owner of the schedule.
        user_id: i32,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
}

impl PostgresDaoError {
    fn source_error(&self) -> &sqlx::Error {
        match self {
            PostgresDaoError::InvalidUrl { source, .. }
            | PostgresDaoError::InitialPing { source, .. }
            | PostgresDaoError::EnsureSchema { source, .. }
            | PostgresDaoError::HealthPing { source }
            | PostgresDaoError::InsertUser { source, .. }
            | PostgresDaoError::LoadUser { source, .. }
            | PostgresDaoError::LoadUserByEmail { source }
            | PostgresDaoError::ListUsers { source }
            | PostgresDaoError::InsertSchedule { source, .. }
            | PostgresDaoError::ListSchedules { source }
            | PostgresDaoError::ListUserSchedules { source, .. } => source,
        }
    }

    /// SQLSTATE of the underlying database error, when the server rejected the statement.
    pub fn constraint_code(&self) -> Option<String> {
        match self.source_error() {
            sqlx::Error::Database(db) => db.code().map(|code| code.into_owned()),
            _ => None,
        }
    }
}
