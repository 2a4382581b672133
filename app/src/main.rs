//! FILENAME: app/src/main.rs

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Default source file, matching the sample dataset the dashboard ships
/// against.
const DEFAULT_DATA_FILE: &str = "Sample - Superstore-1.xlsx";
const DEFAULT_ADDR: &str = "127.0.0.1:8600";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let source_path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("STOREBOARD_DATA").ok())
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
        .into();

    let addr: SocketAddr = std::env::var("STOREBOARD_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let state = Arc::new(app_lib::create_app_state(source_path.clone()));

    // The dashboard cannot render without data: load eagerly and fail
    // fast on access or schema problems.
    let dataset = state
        .dataset()
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", source_path.display()))?;
    tracing::info!(
        rows = dataset.len(),
        path = %source_path.display(),
        "dataset loaded"
    );

    let app = app_lib::router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("storeboard listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
