// ABOUTME: HTTP server assembly wiring routes, shared resources, and middleware
// ABOUTME: Owns the axum router construction and the listener lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # HTTP Server
//!
//! Builds the axum router from the domain route modules and serves it.
//! All handlers share one [`ServerResources`], created once at startup.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::llm::LlmProvider;
use crate::routes::{ChatRoutes, HealthRoutes, LogRoutes, UserRoutes};

/// Shared resources available to every request handler
pub struct ServerResources {
    /// SQLite persistence layer
    pub database: Database,
    /// Chat completion provider
    pub llm: Arc<dyn LlmProvider>,
}

impl ServerResources {
    /// Bundle the server's shared dependencies
    #[must_use]
    pub fn new(database: Database, llm: Arc<dyn LlmProvider>) -> Self {
        Self { database, llm }
    }
}

/// HTTP server for the ReactFit API
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server over the given resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(ChatRoutes::routes())
            .merge(UserRoutes::routes())
            .merge(LogRoutes::routes())
            .merge(HealthRoutes::routes())
            .layer(TraceLayer::new_for_http())
            // The mobile client is served from a different origin
            .layer(CorsLayer::permissive())
            .with_state(self.resources.clone())
    }

    /// Bind the listener and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if binding the port fails or the server exits
    /// abnormally.
    pub async fn run(&self, port: u16) -> AppResult<()> {
        let addr = format!("0.0.0.0:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        info!("HTTP server listening on {addr}");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

        Ok(())
    }
}
