//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::middleware;
use super::routes::effort::{EffortApiState, get_effort};
use super::routes::health;
use crate::core::config::ServerConfig;
use crate::core::shutdown::ShutdownService;
use crate::domain::EffortService;

pub struct ApiServer {
    config: ServerConfig,
    effort: Arc<EffortService>,
    shutdown: ShutdownService,
}

impl ApiServer {
    pub fn new(config: ServerConfig, effort: Arc<EffortService>, shutdown: ShutdownService) -> Self {
        Self {
            config,
            effort,
            shutdown,
        }
    }

    /// Serve until the shutdown signal fires
    pub async fn start(self) -> Result<()> {
        let Self {
            config,
            effort,
            shutdown,
        } = self;

        let addr = resolve_addr(&config.host, config.port)?;
        let router = router(effort);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(%addr, "Listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::debug!("Server stopped");
        Ok(())
    }
}

/// Build the application router
pub fn router(effort: Arc<EffortService>) -> Router {
    let effort_routes = Router::new()
        .route("/effort", get(get_effort))
        .with_state(EffortApiState { effort });

    Router::new()
        .route("/api/v1/health", get(health::health))
        .merge(effort_routes)
        .fallback(middleware::handle_404)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Accepts `localhost` as well as literal IPs
fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let ip = match host {
        "localhost" => "127.0.0.1",
        other => other.trim_start_matches('[').trim_end_matches(']'),
    };
    let ip = ip
        .parse()
        .with_context(|| format!("Invalid server host: {}", host))?;
    Ok(SocketAddr::new(ip, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_addr() {
        assert_eq!(
            resolve_addr("127.0.0.1", 5000).unwrap().to_string(),
            "127.0.0.1:5000"
        );
        assert_eq!(
            resolve_addr("localhost", 8080).unwrap().to_string(),
            "127.0.0.1:8080"
        );
        assert_eq!(resolve_addr("[::]", 80).unwrap().to_string(), "[::]:80");
        assert!(resolve_addr("not a host", 80).is_err());
    }
}
