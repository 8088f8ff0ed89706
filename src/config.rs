//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! HTTP cache TTLs, measurement limits, BMI band thresholds, logging and default
//! paths. `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// An evaluation is a pure function of its query, so successful responses can be
// cached by upstream caches (nginx, CDNs) for a long time. All values in seconds.

/// BMI evaluations - output depends only on the input parameters
pub const HTTP_CACHE_BMI_MAX_AGE: u32 = 3600;

/// Category reference table - static for the lifetime of a release
pub const HTTP_CACHE_CATEGORIES_MAX_AGE: u32 = 86400;

pub const CACHE_CONTROL_BMI: &str = formatcp!("public, max-age={}", HTTP_CACHE_BMI_MAX_AGE);

pub const CACHE_CONTROL_CATEGORIES: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_CATEGORIES_MAX_AGE);

/// Rejected requests are never stored
pub const CACHE_CONTROL_ERROR: &str = "no-store";

// =============================================================================
// Measurement Limits
// =============================================================================

/// Heaviest accepted weight in kilograms
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Tallest accepted height in meters (after unit normalization)
pub const MAX_HEIGHT_M: f64 = 3.0;

/// Centimeters per meter, used when normalizing `unit=cm` heights
pub const CENTIMETERS_PER_METER: f64 = 100.0;

// =============================================================================
// BMI Band Thresholds (inclusive lower bounds)
// =============================================================================

pub const BMI_NORMAL_LOWER: f64 = 18.5;
pub const BMI_OVERWEIGHT_LOWER: f64 = 23.0;
pub const BMI_OBESE_LOWER: f64 = 25.0;
pub const BMI_SEVERELY_OBESE_LOWER: f64 = 30.0;

// =============================================================================
// Server Lifecycle
// =============================================================================

/// Seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "bmi_service=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub tls: TlsConfig,
}

/// How the listener terminates TLS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain HTTP, for development or behind a reverse proxy
    #[default]
    None,
    /// User-provided PEM certificate and key
    Manual,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub mode: TlsMode,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.tls.mode == TlsMode::Manual
            && (self.http.tls.cert_path.is_none() || self.http.tls.key_path.is_none())
        {
            return Err(ConfigError::Validation(
                "http.tls.mode = \"manual\" requires both cert_path and key_path".to_string(),
            ));
        }

        let format = self.logging.format.to_ascii_lowercase();
        if format != "text" && format != "json" {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
