//! Server entry point: load config, open the database, serve the router.

use tracing::info;
use tracing_subscriber::EnvFilter;

use merx_api::{router, ApiConfig, AppState};
use merx_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; ignore a missing file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,merx_api=debug,merx_db=debug")),
        )
        .init();

    let config = ApiConfig::from_env()?;
    info!(
        port = config.port,
        database_path = %config.database_path,
        "Starting merx-api"
    );

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let app = router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
