//! Answer server binary
//!
//! Run with: cargo run -p kb-answer --bin kb-answer-server

use kb_answer::{config::AppConfig, server::AnswerServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kb_answer=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from the environment
    let config = AppConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Project: {}", config.discovery.project_id);
    tracing::info!("  - Engine: {}", config.discovery.engine_id);
    tracing::info!("  - Location: {}", config.discovery.location);
    tracing::info!("  - Collection: {}", config.discovery.collection);
    tracing::info!("  - Model: {}", config.gemini.model);

    let server = AnswerServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/api/v1/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/v1/hackrx/run - Answer question batches");
    println!("  POST /api/v1/chat       - Single-turn chat");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
