//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chart::ChartStyle;
use crate::covid::CovidClientConfig;
use crate::dashboard::DashboardSettings;
use crate::format::Locale;
use crate::users::PlaceholderConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub covid_api: CovidApiConfig,

    #[serde(default)]
    pub placeholder: PlaceholderApiConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// COVID statistics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CovidApiConfig {
    #[serde(default = "default_covid_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_covid_url() -> String {
    "https://api.covid19api.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("covid-board/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for CovidApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_covid_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CovidApiConfig {
    pub fn client_config(&self) -> CovidClientConfig {
        CovidClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Placeholder user API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderApiConfig {
    #[serde(default = "default_placeholder_url")]
    pub base_url: String,
}

fn default_placeholder_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

impl Default for PlaceholderApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_placeholder_url(),
        }
    }
}

impl PlaceholderApiConfig {
    pub fn client_config(&self, timeout_secs: u64) -> PlaceholderConfig {
        PlaceholderConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: timeout_secs * 1000,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8085
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_chart_window")]
    pub chart_window: usize,

    #[serde(default = "default_chart_title")]
    pub chart_title: String,

    #[serde(default = "default_chart_color")]
    pub chart_color: String,

    #[serde(default = "default_font_color")]
    pub font_color: String,

    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_chart_window() -> usize {
    14 // two weeks
}

fn default_chart_title() -> String {
    "Confirmed for the last two weeks".to_string()
}

fn default_chart_color() -> String {
    "#feb72b".to_string()
}

fn default_font_color() -> String {
    "#f5eaea".to_string()
}

fn default_font_family() -> String {
    "Exo 2".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            chart_window: default_chart_window(),
            chart_title: default_chart_title(),
            chart_color: default_chart_color(),
            font_color: default_font_color(),
            font_family: default_font_family(),
        }
    }
}

impl DashboardConfig {
    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            locale: self.locale,
            chart_window: self.chart_window,
            chart_title: self.chart_title.clone(),
        }
    }

    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            font_color: self.font_color.clone(),
            font_family: self.font_family.clone(),
            series_color: self.chart_color.clone(),
            ..ChartStyle::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("covid-board").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("COVID_BOARD_API_URL") {
            self.covid_api.base_url = url;
        }

        // Server overrides
        if let Ok(host) = std::env::var("COVID_BOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("COVID_BOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(locale) = std::env::var("COVID_BOARD_LOCALE") {
            match locale.parse() {
                Ok(l) => self.dashboard.locale = l,
                Err(e) => tracing::warn!("Ignoring COVID_BOARD_LOCALE: {}", e),
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("COVID_BOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("COVID_BOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Covid Board Configuration
#
# Environment variables override these settings:
# - COVID_BOARD_API_URL
# - COVID_BOARD_HOST
# - COVID_BOARD_PORT
# - COVID_BOARD_LOCALE
# - COVID_BOARD_LOG_LEVEL
# - COVID_BOARD_LOG_FORMAT

[covid_api]
# Statistics API base URL
base_url = "https://api.covid19api.com"

# Request timeout in seconds
request_timeout_secs = 10

[placeholder]
# Placeholder user API base URL
base_url = "https://jsonplaceholder.typicode.com"

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8085

[dashboard]
# Date formatting: "en-US" or "ko-KR"
locale = "en-US"

# Number of trailing daily records shown in the chart
chart_window = 14

chart_title = "Confirmed for the last two weeks"
chart_color = "#feb72b"
font_color = "#f5eaea"
font_family = "Exo 2"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.covid_api.base_url, "https://api.covid19api.com");
        assert_eq!(config.server.port, 8085);
        assert_eq!(config.dashboard.chart_window, 14);
        assert_eq!(config.dashboard.locale, Locale::EnUs);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.dashboard.chart_title, "Confirmed for the last two weeks");
        assert_eq!(config.dashboard.font_family, "Exo 2");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[dashboard]
locale = "ko-KR"
chart_window = 7

[server]
port = 9000
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dashboard.locale, Locale::KoKr);
        assert_eq!(config.dashboard.chart_window, 7);
        assert_eq!(config.dashboard.chart_color, "#feb72b");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/covid-board.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_derived_settings() {
        let config = Config::default();
        let settings = config.dashboard.settings();
        assert_eq!(settings.chart_window, 14);

        let style = config.dashboard.chart_style();
        assert_eq!(style.series_color, "#feb72b");

        let client = config.covid_api.client_config();
        assert_eq!(client.request_timeout_ms, 10_000);
    }
}
