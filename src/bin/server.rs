//! Flash-card server binary
//!
//! Run with: cargo run --bin studydeck-server

use std::sync::Arc;

use studydeck::generation::GeminiClient;
use studydeck::{config::AppConfig, server::Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studydeck=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - AI model: {}", config.ai.model);
    tracing::info!("  - Max upload size: {} bytes", config.server.max_upload_size);

    if config.ai.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; uploads will fail at generation");
    }

    let generator = Arc::new(GeminiClient::new(&config.ai)?);
    let server = Server::new(config, generator);

    println!("\nServer starting...");
    println!("  API: http://{}/api", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());

    server.start().await?;
    Ok(())
}
