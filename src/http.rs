use crate::config::{HttpConfig, TimeConfig};
use crate::dispatcher::ToolDispatcher;
use crate::error::TimeError;
use crate::intl::iso_string;
use crate::mcp::dto::{McpRequest, McpResponse};
use crate::mcp::handler;
use crate::session::{SessionGuard, SessionRegistry};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

pub const MCP_PATH: &str = "/mcp";

#[derive(Clone)]
struct AppState {
    dispatcher: Arc<ToolDispatcher>,
    sessions: Arc<SessionRegistry>,
    keep_alive: Duration,
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

pub fn router(dispatcher: Arc<ToolDispatcher>, config: &HttpConfig) -> Router {
    let state = AppState {
        dispatcher,
        sessions: Arc::new(SessionRegistry::new(config.session_buffer)),
        keep_alive: Duration::from_secs(config.sse_keep_alive_secs.max(1)),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route(MCP_PATH, get(open_session).post(post_message))
        .route("/rpc", post(handle_rpc))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.cors_enabled {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

pub async fn run_http_server(dispatcher: Arc<ToolDispatcher>, config: &TimeConfig) -> Result<()> {
    let app = router(dispatcher, &config.http);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting HTTP MCP server on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("MCP endpoint: http://{}{}", addr, MCP_PATH);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": iso_string(chrono::Utc::now()),
    }))
}

async fn open_session(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let (session, mut inbox) = state.sessions.open();
    let endpoint = format!("{}?sessionId={}", MCP_PATH, session.id());
    let guard = SessionGuard::new(Arc::clone(&state.sessions), session.id());
    tracing::info!("SSE session {} opened", session.id());

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok::<Event, Infallible>(Event::default().event("endpoint").data(endpoint));
        while let Some(message) = inbox.recv().await {
            match serde_json::to_string(&message) {
                Ok(json) => yield Ok(Event::default().event("message").data(json)),
                Err(e) => tracing::error!("Failed to encode SSE message: {}", e),
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(state.keep_alive)
            .text("keep-alive"),
    )
}

async fn post_message(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    body: String,
) -> Response {
    let Some(raw_id) = query.session_id else {
        return (StatusCode::BAD_REQUEST, "Missing sessionId").into_response();
    };
    let Some(session) = Uuid::parse_str(&raw_id)
        .ok()
        .and_then(|id| state.sessions.get(&id))
    else {
        return (StatusCode::NOT_FOUND, "Session not found").into_response();
    };

    let request = match serde_json::from_str::<McpRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Invalid JSON-RPC message for session {}: {}", raw_id, e);
            return (StatusCode::BAD_REQUEST, Json(McpResponse::parse_error(&e))).into_response();
        }
    };

    if let Some(response) = handler::handle_request(&state.dispatcher, request) {
        match session.send(response) {
            Ok(()) => {}
            Err(e @ TimeError::SessionBacklogged(_)) => {
                tracing::warn!("Dropping response: {}", e);
                return (StatusCode::SERVICE_UNAVAILABLE, "Session stream is full").into_response();
            }
            Err(e) => {
                tracing::warn!("Dropping response: {}", e);
                state.sessions.close(&session.id());
                return (StatusCode::GONE, "Session closed").into_response();
            }
        }
    }

    StatusCode::ACCEPTED.into_response()
}

async fn handle_rpc(State(state): State<AppState>, body: String) -> Response {
    match serde_json::from_str::<McpRequest>(&body) {
        Ok(request) => match handler::handle_request(&state.dispatcher, request) {
            Some(response) => Json(response).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        },
        Err(e) => (StatusCode::BAD_REQUEST, Json(McpResponse::parse_error(&e))).into_response(),
    }
}
