//! HTTP server infrastructure for SurfsUp
//!
//! [`HttpServer`] wraps an application router with `/health`, request
//! tracing and per-route metrics, and runs it until a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires.
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! let server = HttpServer::new(ServerConfig::default(), "surfsup", router);
//! server.run_with_shutdown_signal().await?;
//! ```

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod shutdown;
pub mod traits;

pub use config::{ports, ServerConfig};
pub use error::{Result, ServerError};
pub use health::{HealthState, HealthStatus};
pub use http::HttpServer;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
