use serde::{Deserialize, Serialize};
use std::fmt;

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Root of the YAML configuration file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SurfsUpConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

/// HTTP listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
        }
    }
}

impl HttpConfig {
    /// Whether the listener is only reachable from this machine.
    pub fn is_loopback(&self) -> bool {
        matches!(self.host.as_str(), "127.0.0.1" | "localhost" | "::1")
    }
}

/// Backing store. Only SQLite URLs are supported.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Behavior switches for the JSON API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Reject date filters that are not `YYYY-MM-DD` with 400 instead of
    /// passing them to the store.
    #[serde(default)]
    pub strict_dates: bool,
    #[serde(default)]
    pub precipitation: PrecipitationLayout,
}

/// Shape of the precipitation response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationLayout {
    /// `{date: prcp}`, one value per date; later rows overwrite earlier ones.
    #[default]
    LastWins,
    /// `[{date, station, prcp}]`, every row kept.
    ByStation,
}

impl fmt::Display for PrecipitationLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecipitationLayout::LastWins => write!(f, "last_wins"),
            PrecipitationLayout::ByStation => write!(f, "by_station"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `pretty`, `json` or `compact`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

/// Prometheus exporter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: SurfsUpConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.service.name, "surfsup");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite://hawaii.sqlite");
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.api.strict_dates);
        assert_eq!(config.api.precipitation, PrecipitationLayout::LastWins);
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
server:
  port: 8080
database:
  url: sqlite:///data/hawaii.sqlite
api:
  strict_dates: true
  precipitation: by_station
metrics:
  enabled: true
"#;
        let config: SurfsUpConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite:///data/hawaii.sqlite");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.api.strict_dates);
        assert_eq!(config.api.precipitation, PrecipitationLayout::ByStation);
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.port, 9090);
    }

    #[test]
    fn test_unknown_precipitation_layout_rejected() {
        let yaml = "api:\n  precipitation: first_wins\n";
        assert!(serde_yaml::from_str::<SurfsUpConfig>(yaml).is_err());
    }

    #[test]
    fn test_loopback_detection() {
        let mut http = HttpConfig::default();
        assert!(http.is_loopback());
        http.host = "0.0.0.0".to_string();
        assert!(!http.is_loopback());
    }
}
