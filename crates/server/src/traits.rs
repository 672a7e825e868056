//! Server lifecycle traits

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::Result;

/// A long-running listener with graceful shutdown.
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Bound address while running.
    fn address(&self) -> Option<SocketAddr>;

    fn is_running(&self) -> bool;

    /// Bind, serve until `shutdown` is cancelled, then drain in-flight
    /// requests and return.
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}

/// Convenience methods for every [`Server`].
pub trait ServerExt: Server + Sized {
    /// Run on a background task; cancel the returned token to stop it.
    fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let handle = tokio::spawn(async move { self.run(token_clone).await });
        (handle, token)
    }

    /// Run until Ctrl+C or SIGTERM.
    fn run_with_shutdown_signal(self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            let shutdown = crate::shutdown::ShutdownController::with_signals();
            let result = self.run(shutdown.token()).await;
            info!(server = self.name(), ok = result.is_ok(), "Server stopped");
            result
        }
    }
}

impl<T: Server + Sized> ServerExt for T {}
