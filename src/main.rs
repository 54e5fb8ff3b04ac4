use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use biker_ocr::{AppConfig, AppState, api::health::ENDPOINTS, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    let state = AppState::new(config.clone());
    state.storage.ensure_dir().await.with_context(|| {
        format!(
            "failed to create upload directory {}",
            state.storage.base_dir().display()
        )
    })?;

    let router = build_router(state);
    let tcp_listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    tracing::info!(
        address = %config.bind_address,
        upload_dir = %config.upload_dir.display(),
        template = %config.template_path.display(),
        max_content_length = config.max_content_length,
        "Biker OCR server started"
    );
    for (route, description) in ENDPOINTS {
        tracing::info!(route, description, "endpoint");
    }
    tracing::info!(route = "GET /uploads/{filename}", description = "Get uploaded image", "endpoint");

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
