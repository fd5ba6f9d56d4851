//! Configuration management
//!
//! Loads configuration from `config.yml` with environment variable
//! overrides (`VESTNIK_*`). Missing optional values are filled with
//! sensible defaults; a missing file yields a fully-defaulted config.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Content presentation configuration
    #[serde(default)]
    pub content: ContentConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (for cookie-based auth)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path or URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/vestnik.db".to_string()
}

/// Content presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Number of articles on the home page
    #[serde(default = "default_news_per_page")]
    pub news_per_page: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            news_per_page: default_news_per_page(),
        }
    }
}

fn default_news_per_page() -> u32 {
    10
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in days
    #[serde(default = "default_session_days")]
    pub session_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_days: default_session_days(),
        }
    }
}

fn default_session_days() -> i64 {
    7
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing or empty file returns the defaults; invalid YAML returns
    /// an error with the parse location.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides.
    ///
    /// Recognized variables:
    /// - VESTNIK_SERVER_HOST
    /// - VESTNIK_SERVER_PORT
    /// - VESTNIK_SERVER_CORS_ORIGIN
    /// - VESTNIK_DATABASE_URL
    /// - VESTNIK_CONTENT_NEWS_PER_PAGE
    /// - VESTNIK_AUTH_SESSION_DAYS
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("VESTNIK_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("VESTNIK_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("VESTNIK_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }
        if let Ok(url) = std::env::var("VESTNIK_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(per_page) = std::env::var("VESTNIK_CONTENT_NEWS_PER_PAGE") {
            if let Ok(per_page) = per_page.parse::<u32>() {
                self.content.news_per_page = per_page;
            }
        }
        if let Ok(days) = std::env::var("VESTNIK_AUTH_SESSION_DAYS") {
            if let Ok(days) = days.parse::<i64>() {
                self.auth.session_days = days;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ENV_VARS: &[&str] = &[
        "VESTNIK_SERVER_HOST",
        "VESTNIK_SERVER_PORT",
        "VESTNIK_SERVER_CORS_ORIGIN",
        "VESTNIK_DATABASE_URL",
        "VESTNIK_CONTENT_NEWS_PER_PAGE",
        "VESTNIK_AUTH_SESSION_DAYS",
    ];

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        let guard = super::CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        guard
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let config = Config::load(std::path::Path::new("nonexistent_config.yml")).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "data/vestnik.db");
        assert_eq!(config.content.news_per_page, 10);
        assert_eq!(config.auth.session_days, 7);
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 3000\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.content.news_per_page, 10);
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9000
database:
  url: "test/vestnik.db"
content:
  news_per_page: 25
auth:
  session_days: 30
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, "test/vestnik.db");
        assert_eq!(config.content.news_per_page, 25);
        assert_eq!(config.auth.session_days, 30);
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            server: ServerConfig {
                host: "localhost".to_string(),
                port: 4000,
                cors_origin: "http://localhost:4000".to_string(),
            },
            database: DatabaseConfig {
                url: ":memory:".to_string(),
            },
            content: ContentConfig { news_per_page: 3 },
            auth: AuthConfig { session_days: 1 },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.server.host, config.server.host);
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.database.url, config.database.url);
        assert_eq!(parsed.content.news_per_page, config.content.news_per_page);
        assert_eq!(parsed.auth.session_days, config.auth.session_days);
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let _guard = lock_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\ncontent:\n  news_per_page: 10\n").unwrap();

        std::env::set_var("VESTNIK_SERVER_PORT", "4000");
        std::env::set_var("VESTNIK_CONTENT_NEWS_PER_PAGE", "5");
        std::env::set_var("VESTNIK_DATABASE_URL", ":memory:");

        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.content.news_per_page, 5);
        assert_eq!(config.database.url, ":memory:");

        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_override_invalid_values_ignored() {
        let _guard = lock_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\n").unwrap();

        std::env::set_var("VESTNIK_SERVER_PORT", "not_a_number");
        std::env::set_var("VESTNIK_CONTENT_NEWS_PER_PAGE", "also_not");

        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content.news_per_page, 10);

        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }
}
