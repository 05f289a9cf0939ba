//! Main server implementation

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    config::ServerConfig,
    error::{Result, ServerError},
    routes,
    state::AppState,
};

/// Build the route table over shared state. Split out so tests can
/// mount the same routes without binding a listener.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/validate", post(routes::validate::validate_application))
        .with_state(state)
}

/// Editcheck HTTP server
pub struct Server {
    config: ServerConfig,
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new server instance, loading the rule set from disk.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let app_state = Arc::new(AppState::new(&config)?);
        Ok(Self { config, app_state })
    }

    /// Start the server and serve until a shutdown signal arrives.
    pub async fn start(self) -> Result<()> {
        let app = self.create_app();
        let addr = self.socket_addr()?;

        info!("Starting editcheck server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        info!("Server stopped gracefully");
        Ok(())
    }

    /// Create the Axum application with middleware layers.
    pub fn create_app(&self) -> Router {
        router(self.app_state.clone())
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.server.timeout,
            )))
            .layer(TraceLayer::new_for_http())
    }

    fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| ServerError::Internal(format!("Invalid server address: {}", e)))
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    warn!("Starting graceful shutdown...");
}
