use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_insight_api::config::Config;
use travel_insight_api::handlers::{streaming_router, AppState};
use travel_insight_api::model_client::OpenAiModelClient;

/// Main entry point for the streaming variant.
///
/// Initializes logging, loads configuration, constructs the model client, and
/// serves the streaming router. The batch variant runs as its own process
/// (`batch_server`), sharing every module but the bootstrap.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_insight_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (fails fast without a provider credential)
    let config = Config::from_env()?;

    // Construct the model client once; handlers share it read-only
    let model_client = Arc::new(OpenAiModelClient::new(&config));
    tracing::info!("Model client initialized: {}", config.openai_model);

    let app_state = Arc::new(AppState {
        config: config.clone(),
        model_client,
    });

    let app = streaming_router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Streaming server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
