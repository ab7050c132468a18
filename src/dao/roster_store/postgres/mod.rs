mod config;
mod connection;
mod error;
mod models;
mod schema;
/// Query implementation of the store.
pub mod store;

pub use config::PostgresConfig;
pub use error::PostgresDaoError;
pub use store::PostgresRosterStore;

use crate::dao::storage::StorageError;

/// SQLSTATE raised on `UNIQUE` violations.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised on `FOREIGN KEY` violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Whether a SQLSTATE reports a write rejected by the schema constraints rather than an outage.
fn is_constraint_violation(code: Option<&str>) -> bool {
    matches!(code, Some(UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION))
}

impl From<PostgresDaoError> for StorageError {
    fn from(err: PostgresDaoError) -> Self {
        if is_constraint_violation(err.constraint_code().as_deref()) {
            StorageError::conflict(err.to_string())
        } else {
            StorageError::unavailable(err.to_string(), err)
        }
    }
}
