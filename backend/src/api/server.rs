//! HTTP Server for the matrixops API.
//!
//! Every operation endpoint takes a multipart form with a `file` field and
//! answers in plain text: `200` with the result, or `400` with the error
//! message.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                              |
//! |--------|---------------|------------------------------------------|
//! | GET    | `/health`     | Health check                             |
//! | POST   | `/echo`       | Matrix as received                       |
//! | POST   | `/transpose`  | Transposed matrix (alias: `/invert`)     |
//! | POST   | `/flatten`    | All elements on one line                 |
//! | POST   | `/sum`        | Sum of all elements                      |
//! | POST   | `/multiply`   | Product of all elements                  |
//! | GET    | `/api/logs`   | SSE stream for real-time logs            |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::logs::{log_info, log_success, LOG_BROADCASTER};
use super::types::HealthResponse;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::models::Operation;
use crate::transform::MatrixService;

/// Shared state: the service and its read-only parser registry.
#[derive(Clone)]
pub struct AppState {
    service: Arc<MatrixService>,
}

impl AppState {
    pub fn new(service: Arc<MatrixService>) -> Self {
        Self { service }
    }
}

/// Build the router with all routes and layers.
pub fn build_router(service: Arc<MatrixService>, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/echo", post(echo))
        .route("/transpose", post(transpose))
        .route("/invert", post(transpose))
        .route("/flatten", post(flatten))
        .route("/sum", post(sum))
        .route("/multiply", post(multiply))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(AppState::new(service));

    if config.cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([header::CONTENT_TYPE]);
        router.layer(cors)
    } else {
        router
    }
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    let service = Arc::new(MatrixService::default());

    log_success(format!("Matrixops server running on http://{}", addr));
    for op in Operation::ALL {
        log_info(format!("POST /{:<10} - {}", op.name(), op.description()));
    }
    log_info(format!(
        "Formats: {} (max upload {} bytes)",
        service.registry().formats().join(", "),
        config.max_upload_bytes
    ));

    serve(listener, service, &config).await?;
    Ok(())
}

/// Serve on an already-bound listener.
pub async fn serve(
    listener: TcpListener,
    service: Arc<MatrixService>,
    config: &ServerConfig,
) -> std::io::Result<()> {
    axum::serve(listener, build_router(service, config)).await
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let formats = state
        .service
        .registry()
        .formats()
        .into_iter()
        .map(String::from)
        .collect();
    Json(HealthResponse::new(formats))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        // Lagged receivers skip what they missed
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn echo(State(state): State<AppState>, multipart: Multipart) -> ServerResult<String> {
    run_upload(&state, multipart, Operation::Echo).await
}

async fn transpose(State(state): State<AppState>, multipart: Multipart) -> ServerResult<String> {
    run_upload(&state, multipart, Operation::Transpose).await
}

async fn flatten(State(state): State<AppState>, multipart: Multipart) -> ServerResult<String> {
    run_upload(&state, multipart, Operation::Flatten).await
}

async fn sum(State(state): State<AppState>, multipart: Multipart) -> ServerResult<String> {
    run_upload(&state, multipart, Operation::Sum).await
}

async fn multiply(State(state): State<AppState>, multipart: Multipart) -> ServerResult<String> {
    run_upload(&state, multipart, Operation::Multiply).await
}

/// Pull the `file` field out of the form and run `operation` on it.
async fn run_upload(
    state: &AppState,
    mut multipart: Multipart,
    operation: Operation,
) -> ServerResult<String> {
    let request_id = Uuid::new_v4();
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            file_data = Some(field.bytes().await?.to_vec());
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".into()))?;

    log_info(format!(
        "[{}] {} {} ({} bytes)",
        request_id,
        operation,
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    ));

    let result = state
        .service
        .run(&bytes, file_name.as_deref(), operation)?;
    Ok(result)
}
