//! REST API server for the person registry

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::openapi::{DOCS_PATH, DOCUMENT_PATH};
use crate::config::ServerConfig;
use crate::registry::Registry;

/// API server exposing the registry over HTTP
pub struct ApiServer {
    registry: Registry,
    config: ServerConfig,
}

/// Shared API state
pub struct ApiState {
    pub registry: Registry,
    pub public_url: String,
}

impl ApiServer {
    /// Create new API server
    pub fn new(registry: Registry, config: ServerConfig) -> Self {
        Self { registry, config }
    }

    /// Start the API server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Start the API server and run until `shutdown` resolves
    pub async fn start_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.bind_addr()?;
        let public_url = self.config.public_url();
        let app = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("API rodando em {}", public_url);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Build API router
    pub fn build_router(self) -> Router {
        let shared_state = Arc::new(ApiState {
            registry: self.registry,
            public_url: self.config.public_url(),
        });

        let mut router = Router::new()
            .route("/", get(handlers::welcome))
            .route("/usuario", post(handlers::create_record))
            .route("/usuario/{cpf}", get(handlers::get_record))
            .route("/usuarios", get(handlers::list_records));

        if self.config.docs_enabled {
            router = router
                .route(DOCS_PATH, get(handlers::docs_page))
                .route(DOCUMENT_PATH, get(handlers::openapi_document));
        }

        if self.config.cors_permissive {
            router = router.layer(CorsLayer::permissive());
        }

        router
            .layer(TraceLayer::new_for_http())
            .with_state(shared_state)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
