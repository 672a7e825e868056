//! Observability for the SurfsUp climate API
//!
//! - Structured logging via tracing
//! - Prometheus exporter plus per-route request metrics
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("surfsup", LogFormat::Pretty)?;
//! observability::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, RequestMetricsGuard, ServerMetrics};
