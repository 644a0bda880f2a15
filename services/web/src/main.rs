use std::time::Duration;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use web::{AppConfig, AppState, create_router};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting TaskDesk web service");

    let config = AppConfig::load()?;
    let state = AppState::new(config.clone())?;

    if config.seed_demo_user {
        state.identity.seed_demo_user()?;
    } else {
        warn!("Demo user seeding disabled");
    }

    // Expired sessions are rejected on read; this only reclaims memory
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.cleanup_expired_sessions().await;
        }
    });

    // Start the web server
    let app = create_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("TaskDesk listening on {} ({})", address, config.environment);

    axum::serve(listener, app).await?;

    Ok(())
}
