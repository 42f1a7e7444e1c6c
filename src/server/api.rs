use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, Query, rejection::JsonRejection },
    response::{ IntoResponse, Response, sse::{ Event, Sse } },
    http::{ StatusCode, HeaderMap, header::AUTHORIZATION },
};
use futures::StreamExt;
use log::{ error, info };
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{ Any, CorsLayer };

use crate::auth::AuthGate;
use crate::cli::Args;
use crate::error::RadarError;
use crate::llm::{ new_client, ChatClient, LlmConfig };
use crate::models::chat::ChatMessage;
use crate::pipeline::IngestionPipeline;
use crate::prompts::CHAT_ASSISTANT_PROMPT;
use crate::relay::{ RelayEvent, StreamRelay };
use crate::store::{ initialize_store, ScanStore };

#[derive(Deserialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ScanQuery {
    secret: Option<String>,
}

#[derive(Clone)]
struct AppState {
    // None when the API key is absent; requests then fail with a generic
    // configuration error instead of the process refusing to start.
    relay: Option<Arc<StreamRelay>>,
    pipeline: Option<Arc<IngestionPipeline>>,
    store: Arc<dyn ScanStore>,
    gate: AuthGate,
}

pub async fn start_http_server(addr: &str, args: Args) -> Result<(), RadarError> {
    let addr = addr.parse::<SocketAddr>()
        .map_err(|e| RadarError::Config(format!("invalid server address: {}", e)))?;
    info!("Starting HTTP API server on: http://{}", addr);

    let store = initialize_store(&args)?;

    let client: Option<Arc<dyn ChatClient>> = match new_client(&LlmConfig::from_args(&args)) {
        Ok(c) => Some(c),
        Err(e) => {
            error!("LLM client unavailable, chat and scan will fail: {}", e);
            None
        }
    };

    let app = build_router(&args, client, store);

    let listener = tokio::net::TcpListener::bind(addr).await
        .map_err(|e| RadarError::Config(format!("failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app.into_make_service()).await
        .map_err(|e| RadarError::Config(format!("HTTP server error: {}", e)))
}

/// Assembles the application router. `client` may be absent when no API key
/// is configured; the affected routes then answer with a generic
/// configuration error.
pub fn build_router(
    args: &Args,
    client: Option<Arc<dyn ChatClient>>,
    store: Arc<dyn ScanStore>,
) -> Router {
    let app_state = AppState {
        relay: client.as_ref().map(|c| {
            Arc::new(StreamRelay::new(
                c.clone(),
                args.chat_max_tokens,
                Duration::from_secs(args.chat_timeout_secs),
            ))
        }),
        pipeline: client.map(|c| {
            Arc::new(IngestionPipeline::new(
                c,
                store.clone(),
                args.scan_max_tokens,
                Duration::from_secs(args.scan_timeout_secs),
            ))
        }),
        store,
        gate: AuthGate::new(args.cron_secret.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/scan", post(scan_post_handler).get(scan_get_handler))
        .route("/refresh", post(refresh_handler))
        .route("/latest", get(latest_handler))
        .layer(cors)
        .with_state(app_state)
}

fn error_response(context: &str, err: &RadarError) -> Response {
    error!("[{}] Error: {}", context, err);
    let body = match err {
        RadarError::Request(_) => json!({ "error": err.public_message() }),
        RadarError::Auth => json!({ "error": "Unauthorized" }),
        _ => json!({
            "error": format!("{} failed", context),
            "details": err.public_message(),
        }),
    };
    (err.status(), Json(body)).into_response()
}

async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Some(relay) = state.relay else {
        return error_response("Chat", &RadarError::Config("missing API key".to_string()));
    };

    let Json(req) = match body {
        Ok(b) => b,
        Err(e) => {
            return error_response(
                "Chat",
                &RadarError::Request(format!("messages array required ({})", e)),
            );
        }
    };

    info!("[Chat] Processing request with {} messages", req.messages.len());

    let events = match relay.relay(CHAT_ASSISTANT_PROMPT, &req.messages).await {
        Ok(events) => events,
        Err(e) => return error_response("Chat", &e),
    };

    let sse_stream = events.map(|item| match item {
        Ok(RelayEvent::Token(text)) => {
            Ok(Event::default().data(json!({ "text": text }).to_string()))
        }
        Ok(RelayEvent::Done) => Ok(Event::default().data("[DONE]")),
        Err(e) => {
            // Tokens already flushed stay flushed; the connection is torn
            // down without the terminal [DONE] marker.
            error!("[Chat] Stream error: {}", e);
            Err(axum::Error::new(e))
        }
    });

    Sse::new(sse_stream).into_response()
}

async fn run_pipeline(state: &AppState, trigger: &str) -> Response {
    let Some(pipeline) = &state.pipeline else {
        return error_response(trigger, &RadarError::Config("missing API key".to_string()));
    };

    match pipeline.run(trigger).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "result_id": summary.result_id,
                "timestamp": summary.timestamp,
                "stats": summary.stats,
            })),
        )
            .into_response(),
        Err(e) => error_response(trigger, &e),
    }
}

async fn scan_post_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let auth_header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if !state.gate.authorize_header(auth_header) {
        return error_response("Scan", &RadarError::Auth);
    }
    run_pipeline(&state, "Scan").await
}

async fn scan_get_handler(
    State(state): State<AppState>,
    Query(query): Query<ScanQuery>,
) -> Response {
    if !state.gate.authorize_query(query.secret.as_deref()) {
        return error_response("Scan", &RadarError::Auth);
    }
    run_pipeline(&state, "Scan").await
}

async fn refresh_handler(State(state): State<AppState>) -> Response {
    // Intentionally ungated: the interactive manual-refresh path.
    run_pipeline(&state, "Refresh").await
}

async fn latest_handler(State(state): State<AppState>) -> Response {
    match state.store.select_latest().await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No data available yet" })),
        )
            .into_response(),
        Err(e) => error_response("Latest", &e),
    }
}
