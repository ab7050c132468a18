//! MrCoffee Back binary entrypoint wiring configuration, storage, sessions and the REST layer.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mrcoffee_back::{
    build_router,
    config::{AppConfig, ServerSettings, StorageBackend},
    dao::roster_store::{RosterStore, memory::MemoryRosterStore},
    services::{session_sweeper, storage_supervisor},
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = ServerSettings::from_env();
    let app_state = AppState::new(AppConfig::load());

    start_storage(app_state.clone(), settings.storage.clone()).await?;
    tokio::spawn(session_sweeper::run(app_state.clone()));

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Install the configured roster store. Postgres is connected by the background supervisor so
/// the server can start (degraded) while the database is down.
async fn start_storage(state: SharedState, backend: StorageBackend) -> anyhow::Result<()> {
    match backend {
        StorageBackend::Memory => {
            info!("using volatile in-memory storage");
            state
                .set_roster_store(Arc::new(MemoryRosterStore::new()))
                .await;
        }
        StorageBackend::Postgres { url } => {
            #[cfg(feature = "postgres-store")]
            {
                use mrcoffee_back::dao::{
                    roster_store::postgres::{PostgresConfig, PostgresRosterStore},
                    storage::StorageError,
                };

                let config = PostgresConfig::from_url(&url).context("parsing DATABASE_URL")?;
                tokio::spawn(storage_supervisor::run(state, move || {
                    let config = config.clone();
                    async move {
                        let store = PostgresRosterStore::connect(config)
                            .await
                            .map_err(StorageError::from)?;
                        Ok::<_, StorageError>(Arc::new(store) as Arc<dyn RosterStore>)
                    }
                }));
            }

            #[cfg(not(feature = "postgres-store"))]
            {
                let _ = (state, url);
                anyhow::bail!("postgres storage requested but the `postgres-store` feature is disabled");
            }
        }
    }

    Ok(())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
