//! HTTP server implementation using Axum

use async_trait::async_trait;
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{routing::get, Router};
use observability::{RequestMetricsGuard, ServerMetrics};
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::health::{health_handler, HealthState};
use crate::traits::Server;

/// Serves an application router plus `GET /health`.
///
/// Every matched route is traced and recorded in the `http_*` metrics under
/// its route template.
///
/// ```ignore
/// let server = HttpServer::new(ServerConfig::default(), "surfsup", climate_routes(state));
/// server.run_with_shutdown_signal().await?;
/// ```
#[derive(Clone)]
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    running: Arc<AtomicBool>,
    bound_addr: Arc<RwLock<Option<SocketAddr>>>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, service_name: &str, app: Router) -> Self {
        let health = Router::new()
            .route("/health", get(health_handler))
            .with_state(Arc::new(HealthState::new(service_name)));

        let router = app
            .merge(health)
            .route_layer(middleware::from_fn_with_state(
                ServerMetrics::new("http"),
                track_metrics,
            ))
            .layer(TraceLayer::new_for_http());

        Self {
            config,
            router,
            running: Arc::new(AtomicBool::new(false)),
            bound_addr: Arc::new(RwLock::new(None)),
        }
    }

    /// Fully layered router, for in-process testing.
    pub fn router(&self) -> &Router {
        &self.router
    }
}

async fn track_metrics(
    State(metrics): State<ServerMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let mut guard = RequestMetricsGuard::new(&metrics, route);
    let response = next.run(request).await;
    guard.set_status(response.status().as_u16());
    response
}

#[async_trait]
impl Server for HttpServer {
    fn name(&self) -> &str {
        "http"
    }

    fn address(&self) -> Option<SocketAddr> {
        *self.bound_addr.read()
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run(&self, shutdown_token: CancellationToken) -> Result<()> {
        if self.config.host.trim().is_empty() {
            return Err(ServerError::ConfigError("host is empty".into()));
        }
        let addr = self.config.bind_address();

        info!(%addr, "Starting HTTP server");

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::bind(addr.clone(), e))?;

        let local_addr = listener.local_addr()?;
        *self.bound_addr.write() = Some(local_addr);

        info!(%local_addr, "HTTP server listening");

        self.running.store(true, Ordering::SeqCst);

        let result = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
                info!("HTTP server received shutdown signal");
            })
            .await;

        self.running.store(false, Ordering::SeqCst);
        *self.bound_addr.write() = None;

        match result {
            Ok(()) => {
                info!("HTTP server shutdown complete");
                Ok(())
            }
            Err(e) => {
                error!(%e, "HTTP server error");
                Err(ServerError::Io(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ServerExt;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request as HttpRequest, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt as _;

    fn app() -> Router {
        Router::new().route("/", get(|| async { "hello" }))
    }

    async fn fetch(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_app_routes_and_health_are_served() {
        let server = HttpServer::new(ServerConfig::default(), "surfsup", app());

        let (status, body) = fetch(server.router().clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"hello");

        let (status, body) = fetch(server.router().clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["service"], "surfsup");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = HttpServer::new(ServerConfig::default(), "surfsup", app());
        let (status, _) = fetch(server.router().clone(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_http_server_shutdown() {
        let server = HttpServer::new(ServerConfig::new("127.0.0.1", 0), "surfsup", app());
        let (handle, token) = server.clone().spawn();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(server.is_running());
        assert!(server.address().is_some());

        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(result.is_ok(), "Server should shutdown within timeout");
        assert!(!server.is_running());
    }

    #[tokio::test]
    async fn test_empty_host_is_rejected() {
        let server = HttpServer::new(ServerConfig::new("", 0), "surfsup", app());
        let result = server.run(CancellationToken::new()).await;
        assert!(matches!(result, Err(ServerError::ConfigError(_))));
    }
}
