//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Bank-file import configuration.
    #[serde(default)]
    pub import: ImportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Bank-file (CNAB) import configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Largest accepted upload, in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TESOURARIA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Result<AppConfig, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_are_applied() {
        let cfg = from_toml(
            r#"
            [server]
            [database]
            url = "postgres://localhost/tesouraria"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(cfg.import.max_file_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let cfg = from_toml(
            r#"
            [server]
            port = 9090
            [database]
            url = "postgres://db/tesouraria"
            max_connections = 4
            [import]
            max_file_bytes = 2048
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.database.max_connections, 4);
        assert_eq!(cfg.import.max_file_bytes, 2048);
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        let result = from_toml(
            r#"
            [server]
            [database]
            "#,
        );
        assert!(result.is_err());
    }
}
