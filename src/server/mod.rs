//! HTTP server
//!
//! [`router`] wires the four to-do routes onto an [`AppState`]. The state is
//! the injection point for storage: pass any [`TodoStore`] and the handlers
//! use it unchanged.

use crate::config::{Config, SessionConfig};
use crate::error::{Result, TodoError};
use crate::storage::TodoStore;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// Dependencies shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// To-do persistence
    pub store: Arc<dyn TodoStore>,
    /// Session cookie settings
    pub session: Arc<SessionConfig>,
}

impl AppState {
    /// Bundle a store and cookie settings into handler state
    pub fn new(store: Arc<dyn TodoStore>, session: SessionConfig) -> Self {
        Self {
            store,
            session: Arc::new(session),
        }
    }
}

/// Build the application router
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use session_todo::config::SessionConfig;
/// use session_todo::server::{router, AppState};
/// use session_todo::storage::MemoryStorage;
///
/// let state = AppState::new(Arc::new(MemoryStorage::new()), SessionConfig::default());
/// let _app = router(state);
/// ```
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/add", post(handlers::add))
        .route("/edit/:id", put(handlers::edit))
        .route("/delete/:id", delete(handlers::delete_todo))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &Config, store: Arc<dyn TodoStore>) -> Result<()> {
    let host = config.server.host.as_str();
    let port = config.server.port;
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| TodoError::Config(format!("Failed to bind {}:{}: {}", host, port, e)))?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    let app = router(AppState::new(store, config.session.clone()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
