use sqlx::PgPool;

use super::error::{PostgresDaoError, PostgresResult};

pub const USERS_TABLE: &str = "users";
pub const SCHEDULES_TABLE: &str = "schedules";

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        firstname TEXT NOT NULL,
        lastname TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
"#;

const CREATE_SCHEDULES: &str = r#"
    CREATE TABLE IF NOT EXISTS schedules (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        day SMALLINT NOT NULL,
        start_at TIME NOT NULL,
        end_at TIME NOT NULL
    )
"#;

/// Create the roster tables when they are missing. Existing tables are left untouched.
pub async fn ensure_schema(pool: &PgPool) -> PostgresResult<()> {
    for (table, statement) in [(USERS_TABLE, CREATE_USERS), (SCHEDULES_TABLE, CREATE_SCHEDULES)] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|source| PostgresDaoError::EnsureSchema { table, source })?;
    }
    Ok(())
}
