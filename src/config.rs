//! Configuration management for the Rain or Rainier service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::RainierError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RainierConfig {
    /// Upstream observation feeds
    #[serde(default)]
    pub stations: StationsConfig,
    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream feed locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsConfig {
    /// NWS latest-observation endpoint for the primary station
    #[serde(default = "default_nws_url")]
    pub nws_url: String,
    /// aviationweather.gov METAR JSON endpoint
    #[serde(default = "default_metar_url")]
    pub metar_url: String,
    /// Contact address sent in the User-Agent, required by the NWS API
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP collector endpoint; spans are exported only when set
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_nws_url() -> String {
    "https://api.weather.gov/stations/KSEA/observations/latest".to_string()
}

fn default_metar_url() -> String {
    "https://aviationweather.gov/api/data/metar?ids=KSEA&format=json".to_string()
}

fn default_contact_email() -> String {
    "contact@example.com".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            nws_url: default_nws_url(),
            metar_url: default_metar_url(),
            contact_email: default_contact_email(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl RainierConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // RAINIER_SERVER__PORT=8080 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("RAINIER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: RainierConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rainier").join("config.toml"))
    }

    /// Apply default values to empty or zero configuration fields
    pub fn apply_defaults(&mut self) {
        if self.stations.nws_url.is_empty() {
            self.stations.nws_url = default_nws_url();
        }
        if self.stations.metar_url.is_empty() {
            self.stations.metar_url = default_metar_url();
        }
        if self.stations.contact_email.is_empty() {
            self.stations.contact_email = default_contact_email();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_timeout();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(RainierError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.http.max_retries > 10 {
            return Err(RainierError::config("HTTP max retries cannot exceed 10").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RainierError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RainierError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("NWS", &self.stations.nws_url),
            ("METAR", &self.stations.metar_url),
        ] {
            if !is_http_url(url) {
                return Err(RainierError::config(format!(
                    "{name} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if let Some(endpoint) = &self.logging.otlp_endpoint {
            if !is_http_url(endpoint) {
                return Err(
                    RainierError::config("OTLP endpoint must be a valid HTTP or HTTPS URL").into(),
                );
            }
        }

        if !self.stations.contact_email.contains('@') {
            return Err(RainierError::config(
                "Contact email must be an email address; the NWS API rejects anonymous clients",
            )
            .into());
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
