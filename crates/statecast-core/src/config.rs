use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{AppError, ConfigError};

/// Open-Meteo rejects `past_days` above this value.
pub const MAX_PAST_DAYS: u32 = 92;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather fetch settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// In-memory forecast cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log filter used when RUST_LOG is unset
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Trailing window of hourly history requested per region
    #[serde(default = "default_past_days")]
    pub past_days: u32,

    /// Region shown when the query is empty
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Rows in the hourly forecast table
    #[serde(default = "default_hourly_window")]
    pub hourly_window: usize,

    /// IANA time zone passed to the API (e.g. "Asia/Kolkata").
    /// When unset the API answers in GMT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Per-request timeout. When unset the HTTP client default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_past_days() -> u32 {
    10
}

fn default_region() -> String {
    "Tamil Nadu".to_string()
}

fn default_hourly_window() -> usize {
    24
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            past_days: default_past_days(),
            default_region: default_region(),
            hourly_window: default_hourly_window(),
            timezone: None,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serve repeated fetches from memory
    #[serde(default)]
    pub enabled: bool,

    /// Entry lifetime in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u32,
}

fn default_ttl_minutes() -> u32 {
    15
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "statecast_weather=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path).map_err(anyhow::Error::from)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration (from `path` when given) and validate it
    ///
    /// `known_regions` lists the region names `weather.default_region` may take.
    /// Returns the config along with any validation warnings; logging is usually
    /// not initialized yet, so reporting them is left to the caller.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(
        path: Option<&Path>,
        known_regions: &[&str],
    ) -> Result<(Self, ValidationResult), AppError> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate_against(known_regions);

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        Ok((config, validation))
    }

    /// Validate the configuration, also checking the default region against
    /// `known_regions`
    pub fn validate_against(&self, known_regions: &[&str]) -> ValidationResult {
        let mut result = self.validate();

        let region = self.weather.default_region.as_str();
        if !known_regions.contains(&region) {
            result.add_warning(
                "weather.default_region",
                format!("{:?} is not a known region; a blank search will show nothing", region),
            );
        }

        result
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);

        if self.weather.past_days > MAX_PAST_DAYS {
            result.add_error(
                "weather.past_days",
                format!("past_days must be at most {}", MAX_PAST_DAYS),
            );
        }

        if self.weather.hourly_window == 0 {
            result.add_error(
                "weather.hourly_window",
                "Hourly window must be greater than 0",
            );
        }

        if self.weather.timezone.as_deref().is_some_and(|tz| tz.trim().is_empty()) {
            result.add_warning("weather.timezone", "Empty time zone is ignored");
        }

        if self.weather.request_timeout_secs == Some(0) {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        }

        if self.cache.enabled && self.cache.ttl_minutes == 0 {
            result.add_warning(
                "cache.ttl_minutes",
                "Cache enabled with a zero TTL; every fetch will miss",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("statecast");

        Ok(config_dir.join("config.toml"))
    }
}
