use std::sync::Arc;

use triagem::api::{self, AppState};
use triagem::classify::Processor;
use triagem::config::AppConfig;
use triagem::llm::GroqClassifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();

    let processor = match &config.remote {
        Some(remote) => {
            let classifier = GroqClassifier::new(remote.clone())?;
            tracing::info!(model = %remote.model, "Remote backend: Groq");
            Processor::with_remote(Arc::new(classifier), remote.timeout)
        }
        None => {
            tracing::info!("Remote backend disabled — rules engine only");
            Processor::local_only()
        }
    };

    let state = AppState {
        processor: Arc::new(processor),
    };
    let app = api::routes(state).layer(api::cors_layer(&config));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Triagem API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
