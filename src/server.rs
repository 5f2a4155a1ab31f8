//! HTTP server exposing the derived views to the chart front end.
//!
//! # Routes
//!
//! ```text
//! GET /health                          status + version
//! GET /api/activities                  activities with durations
//! GET /api/adjacency                   raw matrix
//! GET /api/network                     nodes with degrees + links
//! GET /api/active-counts[?percentile]  daily series + peaks
//! ```
//!
//! Successful bodies are `{"ok": true, ...}`; failures are HTTP 500 with
//! `{"ok": false, "error": "..."}`. Nothing is cached: each request re-reads
//! the source files on the blocking pool.

use crate::dataset::Dataset;
use crate::ingest::{Activity, AdjacencyMatrix, LoadError};
use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind to (0 for random)
    pub port: u16,
    /// Source files to serve from
    pub dataset: Dataset,
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(port: u16, dataset: Dataset) -> Self {
        Self { port, dataset }
    }
}

/// Shared server state
pub struct ServerState {
    dataset: Dataset,
}

/// Success envelope around a payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Json<Self> {
        Json(Self { ok: true, data })
    }
}

#[derive(Debug, Serialize)]
pub struct ActivitiesPayload {
    pub activities: Vec<Activity>,
}

#[derive(Debug, Serialize)]
pub struct AdjacencyPayload {
    pub matrix: AdjacencyMatrix,
}

/// Query string for `/api/active-counts`.
#[derive(Debug, Default, Deserialize)]
pub struct CountsQuery {
    pub percentile: Option<f64>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(message: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            ok: false,
            error: message,
        }),
    )
}

/// Run a derivation against the dataset off the async runtime.
async fn derive<T, F>(state: &Arc<ServerState>, route: &'static str, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Dataset) -> Result<T, LoadError> + Send + 'static,
{
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || f(&state.dataset)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::error!(route, "Request failed: {}", e);
            Err(internal_error(e.to_string()))
        }
        Err(e) => {
            tracing::error!(route, "Derivation task failed: {}", e);
            Err(internal_error(format!("Internal error: {e}")))
        }
    }
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/activities
async fn activities(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ApiResponse<ActivitiesPayload>>, ApiError> {
    let activities = derive(&state, "activities", Dataset::activities).await?;
    Ok(ApiResponse::success(ActivitiesPayload { activities }))
}

/// GET /api/adjacency
async fn adjacency(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ApiResponse<AdjacencyPayload>>, ApiError> {
    let matrix = derive(&state, "adjacency", Dataset::adjacency).await?;
    Ok(ApiResponse::success(AdjacencyPayload { matrix }))
}

/// GET /api/network
async fn network(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ApiResponse<crate::core::Network>>, ApiError> {
    let network = derive(&state, "network", Dataset::network).await?;
    Ok(ApiResponse::success(network))
}

/// GET /api/active-counts
///
/// Without `percentile` the fixed top-10% rule applies; with it, peaks are
/// picked at that percentile and plateaus are collapsed.
async fn active_counts(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<CountsQuery>,
) -> Result<Json<ApiResponse<crate::dataset::ActiveCounts>>, ApiError> {
    let counts = match query.percentile {
        Some(p) => {
            derive(&state, "active-counts", move |d| {
                d.active_counts_with_percentile(p)
            })
            .await?
        }
        None => derive(&state, "active-counts", Dataset::active_counts).await?,
    };
    Ok(ApiResponse::success(counts))
}

/// Build the router. Exposed separately so it can be mounted elsewhere.
pub fn router(dataset: Dataset) -> Router {
    let state = Arc::new(ServerState { dataset });

    Router::new()
        .route("/health", get(health))
        .route("/api/activities", get(activities))
        .route("/api/adjacency", get(adjacency))
        .route("/api/network", get(network))
        .route("/api/active-counts", get(active_counts))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
        .with_state(state)
}

/// A running server. Dropping it leaves the server running until the
/// runtime goes away; call [`ServerHandle::shutdown`] to stop it cleanly.
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Address actually bound (resolves port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal graceful shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let _ = self.shutdown_tx.send(());
        self.task.await?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Run the HTTP server
pub async fn run(config: ServerConfig) -> anyhow::Result<ServerHandle> {
    let app = router(config.dataset);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Activity visualizer API listening on http://{}", actual_addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Server shutdown signal received");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr: actual_addr,
        shutdown_tx,
        task,
    })
}
