//! Configuration management for stargazer
//!
//! Handles loading configuration from files and environment variables,
//! and validates provider credentials and settings before any client is built.

use crate::StargazerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StargazerConfig {
    /// Geocoding provider (OpenCage)
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Weather forecast provider (OpenWeatherMap)
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Generative text provider (OpenAI)
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Report assembly policy
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Generative text provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,
    /// Completion model identifier
    #[serde(default = "default_generation_model")]
    pub model: String,
    /// Upper bound on generated tokens per prompt
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Report assembly policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Abort the whole report when the place cannot be geocoded
    #[serde(default = "default_require_geocoding")]
    pub require_geocoding: bool,
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
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://api.opencagedata.com/geocode/v1".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_generation_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generation_model() -> String {
    "gpt-3.5-turbo-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_timeout() -> u32 {
    30
}

fn default_require_geocoding() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            require_geocoding: default_require_geocoding(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl GenerationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl StargazerConfig {
    /// Load configuration from `config_path`, or the default file location
    /// when `None`, layered under environment variables
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

        // STARGAZER_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("STARGAZER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: StargazerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stargazer").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.generation.base_url.is_empty() {
            self.generation.base_url = default_generation_base_url();
        }
        if self.generation.model.is_empty() {
            self.generation.model = default_generation_model();
        }
        if self.generation.max_tokens == 0 {
            self.generation.max_tokens = default_max_tokens();
        }
        if self.generation.timeout_seconds == 0 {
            self.generation.timeout_seconds = default_timeout();
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
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the three provider credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        validate_api_key("Geocoding", "STARGAZER_GEOCODING__API_KEY", &self.geocoding.api_key)?;
        validate_api_key("Weather", "STARGAZER_WEATHER__API_KEY", &self.weather.api_key)?;
        validate_api_key(
            "Text generation",
            "STARGAZER_GENERATION__API_KEY",
            &self.generation.api_key,
        )?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Weather", self.weather.timeout_seconds),
            ("Text generation", self.generation.timeout_seconds),
        ];
        for (provider, timeout) in timeouts {
            if timeout > 300 {
                return Err(StargazerError::config(format!(
                    "{provider} API timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if !(1..=4096).contains(&self.generation.max_tokens) {
            return Err(
                StargazerError::config("Text generation max_tokens must be between 1 and 4096")
                    .into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(StargazerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(StargazerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let base_urls = [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
            ("Text generation", &self.generation.base_url),
        ];
        for (provider, url) in base_urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StargazerError::config(format!(
                    "{provider} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

fn validate_api_key(provider: &str, env_var: &str, api_key: &str) -> Result<()> {
    if api_key.is_empty() {
        return Err(StargazerError::config(format!(
            "{provider} API key is missing. Set it in the config file or via {env_var}."
        ))
        .into());
    }

    if api_key.len() < 8 {
        return Err(StargazerError::config(format!(
            "{provider} API key appears to be invalid (too short). Please check your API key."
        ))
        .into());
    }

    if api_key.len() > 200 {
        return Err(StargazerError::config(format!(
            "{provider} API key appears to be invalid (too long). Please check your API key."
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_with_keys() -> StargazerConfig {
        let mut config = StargazerConfig::default();
        config.geocoding.api_key = "geo_key_123456".to_string();
        config.weather.api_key = "weather_key_123456".to_string();
        config.generation.api_key = "sk-generation-123456".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = StargazerConfig::default();
        assert_eq!(
            config.geocoding.base_url,
            "https://api.opencagedata.com/geocode/v1"
        );
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.generation.max_tokens, 150);
        assert_eq!(config.weather.timeout_seconds, 30);
        assert!(config.report.require_geocoding);
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_empty());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        let config = StargazerConfig::default();
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Geocoding API key is missing"));
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = config_with_keys();
        config.weather.api_key = "abc".to_string();
        let result = config.validate_api_keys();
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_valid_api_keys() {
        let config = config_with_keys();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = config_with_keys();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = config_with_keys();
        config.generation.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = config_with_keys();
        config.generation.max_tokens = 10_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = config_with_keys();
        config.weather.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("HTTP or HTTPS"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = config_with_keys();
        config.generation.model = String::new();
        config.weather.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.generation.model, "gpt-3.5-turbo-instruct");
        assert_eq!(config.weather.timeout_seconds, 30);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("stargazer-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[geocoding]
api_key = "geo_key_from_file"

[weather]
api_key = "weather_key_from_file"
timeout_seconds = 10

[generation]
api_key = "sk-generation-from-file"
max_tokens = 200

[report]
require_geocoding = false
"#
        )
        .unwrap();

        let config = StargazerConfig::load_from_path(Some(path)).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(config.geocoding.api_key, "geo_key_from_file");
        assert_eq!(config.weather.timeout(), Duration::from_secs(10));
        assert_eq!(config.generation.max_tokens, 200);
        assert_eq!(config.generation.model, "gpt-3.5-turbo-instruct");
        assert!(!config.report.require_geocoding);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = StargazerConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("stargazer"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
