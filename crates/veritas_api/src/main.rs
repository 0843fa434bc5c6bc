use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use veritas_api::routes::app_router;
use veritas_service::{Config, VeritasService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let port = config.port;

    let service = VeritasService::connect(&config)
        .await
        .context("wiring backends")?;

    let app = app_router(Arc::new(service));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "verification portal listening");

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
