use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_insight_api::config::Config;
use travel_insight_api::handlers::{batch_router, AppState};
use travel_insight_api::model_client::OpenAiModelClient;

/// Entry point for the batch variant.
///
/// One blocking completion per request, single JSON document back. Deployed
/// as a separate process from the streaming server with its own PORT.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_insight_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let model_client = Arc::new(OpenAiModelClient::new(&config));
    tracing::info!("Model client initialized: {}", config.openai_model);

    let app_state = Arc::new(AppState {
        config: config.clone(),
        model_client,
    });

    let app = batch_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Batch server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
