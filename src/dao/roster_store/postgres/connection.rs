use std::time::Duration;

use sqlx::PgPool;
use tokio::time::sleep;
use tracing::debug;

use super::{
    config::PostgresConfig,
    error::{PostgresDaoError, PostgresResult},
};

struct RetryPolicy;

impl RetryPolicy {
    const MAX_ATTEMPTS: u32 = 10;
    const INITIAL_DELAY_MS: u64 = 250;

    fn initial_delay() -> Duration {
        Duration::from_millis(Self::INITIAL_DELAY_MS)
    }

    fn next_delay(current: Duration) -> Duration {
        (current * 2).min(Duration::from_secs(5))
    }
}

/// Build a lazily connecting pool and wait until the server answers a ping.
pub async fn establish_pool(config: &PostgresConfig) -> PostgresResult<PgPool> {
    let pool = config.pool.clone().connect_lazy_with(config.options.clone());

    let mut attempts = 0;
    let mut delay = RetryPolicy::initial_delay();

    loop {
        match ping(&pool).await {
            Ok(()) => break,
            Err(err) => {
                attempts += 1;
                if attempts >= RetryPolicy::MAX_ATTEMPTS {
                    return Err(PostgresDaoError::InitialPing {
                        attempts,
                        source: err,
                    });
                }
                debug!(attempts, error = %err, "Postgres not reachable yet");
                sleep(delay).await;
                delay = RetryPolicy::next_delay(delay);
            }
        }
    }

    Ok(pool)
}

pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
