use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::insights::extract_insights;
use crate::model_client::ModelClient;
use crate::models::{BatchResponse, GroupProfile};
use crate::prompts::AnalysisTemplate;
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Fields the batch endpoint requires before calling the model.
const BATCH_REQUIRED_FIELDS: [&str; 5] = ["id", "groupName", "userName", "password", "customers"];

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Model provider client, shared read-only across requests.
    pub model_client: Arc<dyn ModelClient>,
}

/// Health check endpoint.
///
/// Returns the service status and version unconditionally.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "travel-insight-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /process_data/ (streaming variant)
///
/// Parses the group profile, opens a completion stream against the model
/// provider, and re-emits the full response object as one SSE event per
/// received fragment. Extraction always re-runs over the entire accumulated
/// text, so earlier lines can still be revised by later fragments.
///
/// On a provider failure the stream ends with a single `{"error": ...}` event;
/// that event's shape intentionally differs from the success shape.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - The group profile, or the JSON rejection if the body was malformed.
///
/// # Returns
///
/// * `Result<Sse<...>, AppError>` - The event stream, or HTTP 400 for a malformed body.
pub async fn process_group_stream(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GroupProfile>, JsonRejection>,
) -> Result<Sse<ReceiverStream<Result<Event, Infallible>>>, AppError> {
    let Json(group) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::info!(
        "POST /process_data/ (stream) - group {} with {} dependents",
        group.id,
        group.dependents.len()
    );

    let input = serde_json::to_value(&group)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize profile: {}", e)))
        .context("building analysis prompt")?;
    let (system_prompt, user_prompt) = AnalysisTemplate::SingleSubject.build(&input);

    // Provider call and snapshot emission run concurrently over a fragment
    // channel; fragments are consumed strictly in arrival order.
    let (fragment_tx, mut fragment_rx) = mpsc::channel::<String>(32);
    let client = state.model_client.clone();
    let provider_call = tokio::spawn(async move {
        client
            .complete_stream(&system_prompt, &user_prompt, fragment_tx)
            .await
    });

    let (event_tx, event_rx) = mpsc::channel::<Result<Event, Infallible>>(32);
    tokio::spawn(async move {
        let mut accumulated = String::new();

        while let Some(fragment) = fragment_rx.recv().await {
            accumulated.push_str(&fragment);
            let snapshot = group.snapshot(extract_insights(&accumulated));
            match serde_json::to_string(&snapshot) {
                Ok(body) => {
                    if event_tx.send(Ok(Event::default().data(body))).await.is_err() {
                        tracing::debug!("SSE receiver dropped, stopping snapshot emission");
                        return;
                    }
                }
                Err(e) => {
                    // Skip this snapshot only; the next fragment re-encodes
                    // over the same accumulated text.
                    tracing::warn!("Snapshot encoding error: {}", e);
                    continue;
                }
            }
        }

        // Fragment channel closed. A provider failure becomes exactly one
        // final error-shaped event; a clean close emits nothing further.
        match provider_call.await {
            Ok(Ok(full_text)) => {
                tracing::info!(
                    "Completion stream finished for group ({} chars total)",
                    full_text.len()
                );
            }
            Ok(Err(e)) => {
                tracing::error!("Provider failure during streaming: {}", e);
                let body = json!({ "error": e.message() }).to_string();
                let _ = event_tx.send(Ok(Event::default().data(body))).await;
            }
            Err(e) => {
                tracing::error!("Provider task panicked: {}", e);
                let body = json!({ "error": format!("Provider task failed: {}", e) }).to_string();
                let _ = event_tx.send(Ok(Event::default().data(body))).await;
            }
        }
    });

    Ok(Sse::new(ReceiverStream::new(event_rx)))
}

/// POST /process_data/ (batch variant)
///
/// Expects a JSON object with at least the keys in `BATCH_REQUIRED_FIELDS`.
/// Runs one blocking completion, extracts the insight lines once, and returns
/// the fixed-order response document. Customers are echoed verbatim without
/// being parsed into typed profiles.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - The raw request body, if one was parseable.
///
/// # Returns
///
/// * `Result<Json<BatchResponse>, AppError>` - The assembled response or an error.
pub async fn process_group_batch(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<Value>>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(body) =
        payload.ok_or_else(|| AppError::BadRequest("No data provided".to_string()))?;
    let object = body
        .as_object()
        .ok_or_else(|| AppError::BadRequest("No data provided".to_string()))?;

    for field in BATCH_REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(AppError::BadRequest(format!(
                "Missing required field: {}",
                field
            )));
        }
    }
    tracing::info!("POST /process_data/ (batch) - group {}", body["id"]);

    let (system_prompt, user_prompt) = AnalysisTemplate::MultiSubject.build(&body);
    let raw_text = state
        .model_client
        .complete(&system_prompt, &user_prompt)
        .await?;

    let insights = extract_insights(&raw_text);
    tracing::info!("Extracted {} insight lines", insights.len());

    Ok(Json(BatchResponse {
        id: body["id"].clone(),
        group_name: body["groupName"].clone(),
        user_name: body["userName"].clone(),
        password: body["password"].clone(),
        customers: body["customers"].clone(),
        augmented_data: insights,
    }))
}

/// Builds the streaming-variant router with the shared middleware stack.
pub fn streaming_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/process_data/", post(process_group_stream))
        .layer(
            // Request size limit: 5MB max payload (prevents memory exhaustion)
            ServiceBuilder::new().layer(RequestBodyLimitLayer::new(5 * 1024 * 1024)),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Builds the batch-variant router with the shared middleware stack.
pub fn batch_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/process_data/", post(process_group_batch))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(5 * 1024 * 1024)))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
