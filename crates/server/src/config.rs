//! Listener configuration

/// Default ports
pub mod ports {
    /// HTTP API port
    pub const SURFSUP_HTTP: u16 = 5000;
    /// Prometheus exporter port
    pub const METRICS: u16 = 9090;
}

/// Where the HTTP server binds.
///
/// ```
/// use server::config::ServerConfig;
///
/// let config = ServerConfig::new("127.0.0.1", 5000);
/// assert_eq!(config.bind_address(), "127.0.0.1:5000");
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host name or IP (e.g. "127.0.0.1", "localhost", "0.0.0.0")
    pub host: String,
    /// Port; 0 asks the OS for an ephemeral port
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, resolved at bind time so host names work too.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", ports::SURFSUP_HTTP)
    }
}

impl From<&::config::HttpConfig> for ServerConfig {
    fn from(http: &::config::HttpConfig) -> Self {
        Self::new(http.host.clone(), http.port)
    }
}
