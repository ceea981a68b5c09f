//! Core game server implementation.
//!
//! This module contains the main `GameServer` struct, which owns the shared
//! point index and serves it over HTTP until shutdown is requested.

use crate::{
    config::ServerConfig,
    error::ServerError,
    server::handlers::{self, AppState},
    shutdown::ShutdownState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use point_index::GeoIndex;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// The core game server structure.
///
/// `GameServer` owns the [`GeoIndex`] for its whole lifetime and hands a
/// shared reference to every request handler through the router state.
///
/// # Routes
///
/// * `POST /games/{game}/points` - upsert a point
/// * `GET /games/{game}/points?x=&y=&radius=` - radius query
/// * `GET /games/{game}/points/{point}` - single point lookup
/// * `DELETE /games/{game}/points/{point}` - idempotent removal
/// * `GET /health` - liveness and index counters
pub struct GameServer {
    /// Server configuration settings
    config: ServerConfig,

    /// The point index shared by all handlers
    index: Arc<GeoIndex>,
}

impl GameServer {
    /// Creates a new game server with the specified configuration.
    ///
    /// The index is created empty, tuned by `config.index`.
    pub fn new(config: ServerConfig) -> Self {
        let index = Arc::new(GeoIndex::with_config(config.index));
        Self { config, index }
    }

    /// Gets a reference to the point index.
    pub fn index(&self) -> Arc<GeoIndex> {
        Arc::clone(&self.index)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Builds the axum router serving the HTTP API.
    ///
    /// The router can be driven directly with `tower::ServiceExt::oneshot`,
    /// without binding a socket.
    pub fn router(&self) -> Router {
        let state = AppState {
            index: self.index(),
            max_name_length: self.config.max_name_length,
        };

        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/games/{game}/points",
                get(handlers::query_points).post(handlers::add_point),
            )
            .route(
                "/games/{game}/points/{point}",
                get(handlers::get_point).delete(handlers::remove_point),
            )
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(DefaultBodyLimit::max(self.config.max_body_bytes)),
            )
            .with_state(state)
    }

    /// Starts the game server and serves requests until the process exits.
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown_state(ShutdownState::new()).await
    }

    /// Starts the game server with a shared shutdown state.
    ///
    /// Binds `config.bind_address` and serves until
    /// [`ShutdownState::initiate_shutdown`] is called. In-flight requests
    /// are allowed to finish; the state is then marked complete.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the server started and stopped cleanly, or a `ServerError`
    /// if binding or serving failed.
    pub async fn start_with_shutdown_state(&self, shutdown_state: ShutdownState) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.config.bind_address)
            .await
            .map_err(|e| {
                error!("Failed to bind {}: {}", self.config.bind_address, e);
                ServerError::Network(format!("failed to bind {}: {e}", self.config.bind_address))
            })?;

        self.serve(listener, shutdown_state).await
    }

    /// Serves requests on an already bound listener until shutdown.
    pub async fn serve(&self, listener: TcpListener, shutdown_state: ShutdownState) -> Result<(), ServerError> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Network(e.to_string()))?;
        info!("🚀 Game server listening on {}", local_addr);

        let signal = shutdown_state.clone();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { signal.wait_for_shutdown().await })
            .await
            .map_err(|e| ServerError::Network(format!("server error: {e}")))?;

        shutdown_state.complete_shutdown();
        info!("Server stopped");
        Ok(())
    }
}
