//! HTTP server with graceful shutdown

use std::net::SocketAddr;

use axum::Router;
use http::StatusCode;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::ServiceConfig, error::Result};

/// Wrap `app` in the middleware stack
///
/// Layers are applied bottom-up: panic recovery is innermost, tracing sees
/// every response including timeouts and body-limit rejections.
pub fn apply_middleware(app: Router, config: &ServiceConfig) -> Router {
    app.layer(CatchPanicLayer::new())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.timeout(),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Server instance
pub struct Server {
    config: ServiceConfig,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Run the server with the given router until SIGINT or SIGTERM
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));

        tracing::info!("Starting {} on {}", self.config.name, addr);
        tracing::info!(
            body_limit_mb = self.config.body_limit_mb,
            timeout_secs = self.config.timeout_secs,
            "Middleware configured"
        );

        let app = apply_middleware(app, &self.config);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
///
/// If a handler cannot be installed that signal is ignored and the other
/// one still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}
