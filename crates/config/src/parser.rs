use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SurfsUpConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    let substituted = substitution::substitute_env_vars(&content)?;
    debug!("Environment variable substitution completed");

    let config: SurfsUpConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<SurfsUpConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!("No config file at {:?}, using defaults", path);
        Ok(SurfsUpConfig::default())
    }
}

#[instrument]
pub fn generate_default_config() -> SurfsUpConfig {
    SurfsUpConfig {
        service: ServiceConfig::default(),
        server: HttpConfig::default(),
        database: DatabaseConfig {
            url: "${SURFSUP_DATABASE_URL:-sqlite://hawaii.sqlite}".to_string(),
            max_connections: default_max_connections(),
        },
        api: ApiConfig::default(),
        logging: LoggingConfig::default(),
        metrics: MetricsConfig::default(),
    }
}

#[instrument]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &SurfsUpConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "service:\n  name: surfsup-test\nserver:\n  port: 5050\napi:\n  precipitation: by_station"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.service.name, "surfsup-test");
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.api.precipitation, PrecipitationLayout::ByStation);
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(load_config(dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = load_config_or_default(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_config_rejects_bad_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server: [unclosed").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_save_and_reload_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("surfsup.yaml");

        save_config(&generate_default_config(), &path).unwrap();
        let reloaded = load_config(&path).unwrap();

        // Generated file points at the env var, which falls back when unset
        if std::env::var("SURFSUP_DATABASE_URL").is_err() {
            assert_eq!(reloaded.database.url, "sqlite://hawaii.sqlite");
        }
        assert_eq!(reloaded.server.host, "127.0.0.1");
        assert_eq!(reloaded.logging.format, "pretty");
    }
}
