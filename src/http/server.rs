//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the negotiation engine from configuration
//! - Create the Axum Router with the negotiation middleware
//! - Wire up middleware (tracing, timeout)
//! - Serve until the shutdown signal fires

use axum::{middleware, routing::any, Extension, Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AppConfig, ConfigError};
use crate::http::middleware::negotiate_language;
use crate::negotiation::{NegotiationEngine, NegotiationResult};

/// HTTP server answering every path with the negotiated language.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the negotiation settings are invalid.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let engine = Arc::new(NegotiationEngine::new(config.negotiation.build()?));

        tracing::info!(
            languages = ?engine.config().languages(),
            methods = ?engine.config().methods(),
            options = ?engine.config().options(),
            router_pattern = engine.config().router_pattern(),
            "Negotiation engine ready"
        );

        let router = Self::build_router(&config, engine);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, engine: Arc<NegotiationEngine>) -> Router {
        Router::new()
            .route("/", any(negotiated_handler))
            .route("/{*path}", any(negotiated_handler))
            .layer(middleware::from_fn_with_state(engine, negotiate_language))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the router, for serving or driving it directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Echo the negotiated result as JSON.
async fn negotiated_handler(
    Extension(result): Extension<NegotiationResult>,
) -> Json<NegotiationResult> {
    Json(result)
}
