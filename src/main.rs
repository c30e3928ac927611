use anyhow::Result;
use tracing::info;

use localization_management_api::config::Config;
use localization_management_api::handlers::{app, AppState};
use localization_management_api::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localization_management_api=info".parse()?),
        )
        .init();

    info!("Starting localization management API");

    // Load configuration from environment; a missing store credential is
    // fatal here rather than on the first request.
    let config = Config::from_env()?;

    let store = Store::new(&config.supabase_url, &config.supabase_service_key);
    let state = AppState { store };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
