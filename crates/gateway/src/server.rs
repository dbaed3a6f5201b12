use std::{net::SocketAddr, sync::Arc};

use {
    axum::{
        Router,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json, Response},
        routing::{get, post},
    },
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::{info, warn},
    webpilot_protocol::{
        BROWSER_STARTED_MESSAGE, BROWSER_STOPPED_MESSAGE, BrowserStarted, BrowserStopped, ErrorDetail,
        STATUS_MESSAGE, StatusInfo, TaskRequest,
    },
};

use crate::{samples::sample_queries, state::GatewayState};

// ── Shared app state ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayState>,
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
pub fn build_gateway_app(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/sample-queries", get(sample_queries_handler))
        .route("/execute-task", post(execute_task_handler))
        .route("/start-chrome", post(start_chrome_handler))
        .route("/stop-chrome", post(stop_chrome_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { gateway: state })
}

/// Bind and serve until the process is stopped.
pub async fn start_gateway(bind: &str, port: u16, state: Arc<GatewayState>) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    let mock_mode = state.mock_mode();
    let version = state.version.clone();
    let app = build_gateway_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, version = %version, mock_mode, "webpilot gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn root_handler(State(state): State<AppState>) -> Json<StatusInfo> {
    Json(StatusInfo {
        message: STATUS_MESSAGE.to_string(),
        mock_mode: state.gateway.mock_mode(),
    })
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.gateway.version,
        "mock_mode": state.gateway.mock_mode(),
    }))
}

async fn sample_queries_handler() -> impl IntoResponse {
    Json(sample_queries())
}

async fn execute_task_handler(
    State(state): State<AppState>,
    Json(request): Json<TaskRequest>,
) -> Response {
    match state.gateway.tasks.execute(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn start_chrome_handler(State(state): State<AppState>) -> Response {
    let process = &state.gateway.tasks.services().process;
    match process.start().await {
        Ok(()) => Json(BrowserStarted {
            message: BROWSER_STARTED_MESSAGE.to_string(),
            port: process.debug_port(),
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "start-chrome failed");
            internal_error(format!("Failed to start browser: {e}"))
        },
    }
}

async fn stop_chrome_handler(State(state): State<AppState>) -> Response {
    match state.gateway.tasks.services().process.stop().await {
        Ok(()) => Json(BrowserStopped {
            message: BROWSER_STOPPED_MESSAGE.to_string(),
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "stop-chrome failed");
            internal_error(format!("Failed to stop browser: {e}"))
        },
    }
}

fn internal_error(detail: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetail::new(detail))).into_response()
}
