//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    ConnectVisitorUseCase, DisconnectVisitorUseCase, GetVisitorCountUseCase,
    SubmitJobOrderUseCase,
};

use super::{
    handler::{health_check, panic_response, submit_job_order, visitor_count, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Default request body limit (photos included)
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Job order relay server
///
/// This struct wires the use cases into an axum router and runs it.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     submit_job_order_usecase,
///     connect_visitor_usecase,
///     disconnect_visitor_usecase,
///     get_visitor_count_usecase,
/// );
/// server.run("0.0.0.0".to_string(), 3000).await?;
/// ```
pub struct Server {
    submit_job_order_usecase: Arc<SubmitJobOrderUseCase>,
    connect_visitor_usecase: Arc<ConnectVisitorUseCase>,
    disconnect_visitor_usecase: Arc<DisconnectVisitorUseCase>,
    get_visitor_count_usecase: Arc<GetVisitorCountUseCase>,
    max_body_bytes: usize,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `submit_job_order_usecase` - UseCase for relaying job orders
    /// * `connect_visitor_usecase` - UseCase for realtime connections
    /// * `disconnect_visitor_usecase` - UseCase for realtime disconnections
    /// * `get_visitor_count_usecase` - UseCase for reading the visitor count
    pub fn new(
        submit_job_order_usecase: Arc<SubmitJobOrderUseCase>,
        connect_visitor_usecase: Arc<ConnectVisitorUseCase>,
        disconnect_visitor_usecase: Arc<DisconnectVisitorUseCase>,
        get_visitor_count_usecase: Arc<GetVisitorCountUseCase>,
    ) -> Self {
        Self {
            submit_job_order_usecase,
            connect_visitor_usecase,
            disconnect_visitor_usecase,
            get_visitor_count_usecase,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the request body limit
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Build the router without binding a socket
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            submit_job_order_usecase: self.submit_job_order_usecase,
            connect_visitor_usecase: self.connect_visitor_usecase,
            disconnect_visitor_usecase: self.disconnect_visitor_usecase,
            get_visitor_count_usecase: self.get_visitor_count_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/visitor-count", get(visitor_count))
            .route("/api/job-orders", post(submit_job_order))
            .layer(DefaultBodyLimit::max(self.max_body_bytes))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Job order relay listening on {}", listener.local_addr()?);
        tracing::info!("Realtime visitor count at: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
