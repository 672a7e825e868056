use crate::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Server host is required")]
    MissingHost,

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("Database: {message}")]
    InvalidDatabase { message: String },

    #[error("Metrics port {port} collides with the HTTP port")]
    PortConflict { port: u16 },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Environment variable in '{field}' is unresolved: {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

pub fn validate_config(config: &SurfsUpConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(&config.service, &mut report);
    validate_server(&config.server, &mut report);
    validate_database(&config.database, &mut report);
    validate_api(&config.api, &mut report);
    validate_logging(&config.logging, &mut report);
    validate_metrics(&config.metrics, &config.server, &mut report);

    report
}

fn validate_service(service: &ServiceConfig, report: &mut ValidationReport) {
    if service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }
}

fn validate_server(server: &HttpConfig, report: &mut ValidationReport) {
    if server.host.trim().is_empty() {
        report.add_error(ValidationError::MissingHost);
    } else if has_unresolved_env_vars(&server.host) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "server.host".to_string(),
            value: server.host.clone(),
        });
    } else if !server.is_loopback() {
        report.add_warning(
            "server.host",
            &format!("Listening on {} exposes the API beyond this machine", server.host),
        );
    }

    if server.port == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "server.port".to_string(),
        });
    }
}

fn validate_database(database: &DatabaseConfig, report: &mut ValidationReport) {
    if database.url.trim().is_empty() {
        report.add_error(ValidationError::InvalidDatabase {
            message: "url is required".to_string(),
        });
    } else if has_unresolved_env_vars(&database.url) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "database.url".to_string(),
            value: database.url.clone(),
        });
    } else if !database.url.starts_with("sqlite:") {
        report.add_error(ValidationError::InvalidDatabase {
            message: format!("only sqlite URLs are supported, got: {}", database.url),
        });
    }

    if database.max_connections == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "database.max_connections".to_string(),
        });
    }
}

fn validate_api(api: &ApiConfig, report: &mut ValidationReport) {
    if api.precipitation == PrecipitationLayout::LastWins {
        report.add_warning(
            "api.precipitation",
            "last_wins keeps one station per date; use by_station to return every reading",
        );
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }
}

fn validate_metrics(metrics: &MetricsConfig, server: &HttpConfig, report: &mut ValidationReport) {
    if !metrics.enabled {
        return;
    }

    if metrics.port == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "metrics.port".to_string(),
        });
    } else if metrics.port == server.port {
        report.add_error(ValidationError::PortConflict { port: metrics.port });
    }
}
