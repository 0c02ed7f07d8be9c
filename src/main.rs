use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ward_core::{HttpWardApi, WardApi, WardConfig};

/// Main entry point for the ward UI
///
/// Resolves configuration once, builds the backend client and serves the web UI.
///
/// # Environment Variables
/// - `WARD_API_URL`: backend base URL (default: "http://localhost:5000/api")
/// - `WARD_ADDR`: web UI address (default: "0.0.0.0:3000")
/// - `WARD_API_TIMEOUT_SECS`: backend request timeout (default: 10)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward_run=info".parse()?)
                .add_directive("ward_web=info".parse()?)
                .add_directive("ward_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(WardConfig::from_values(
        std::env::var("WARD_API_URL").ok(),
        std::env::var("WARD_ADDR").ok(),
        std::env::var("WARD_API_TIMEOUT_SECS").ok(),
    )?);
    let api: Arc<dyn WardApi> = Arc::new(HttpWardApi::new(&cfg)?);
    tracing::info!(
        "-- Backend {} (timeout {}s)",
        cfg.api_base_url(),
        cfg.api_timeout().as_secs()
    );

    ward_web::serve(cfg, api).await
}
