//! Error types and handling for the stargazer pipeline

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// External provider a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Geocoding,
    Weather,
    TextGeneration,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Geocoding => write!(f, "geocoding"),
            ProviderKind::Weather => write!(f, "weather"),
            ProviderKind::TextGeneration => write!(f, "text generation"),
        }
    }
}

/// Main error type for the stargazer crate
#[derive(Error, Debug)]
pub enum StargazerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The provider could not be reached (connect, timeout, body read)
    #[error("{provider} provider unreachable: {source}")]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status
    #[error("{provider} provider returned HTTP {status}")]
    Status { provider: ProviderKind, status: u16 },

    /// The provider answered, but not with something we can use
    #[error("{provider} provider sent an invalid response: {message}")]
    InvalidResponse {
        provider: ProviderKind,
        message: String,
    },
}

impl StargazerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wrap a reqwest error. The request URL is dropped because it carries
    /// API keys in the query string for some providers.
    pub fn transport(provider: ProviderKind, source: reqwest::Error) -> Self {
        Self::Transport {
            provider,
            source: source.without_url(),
        }
    }

    pub fn status(provider: ProviderKind, status: u16) -> Self {
        Self::Status { provider, status }
    }

    pub fn invalid_response<S: Into<String>>(provider: ProviderKind, message: S) -> Self {
        Self::InvalidResponse {
            provider,
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StargazerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            StargazerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            StargazerError::Transport { provider, .. } => format!(
                "Unable to reach the {provider} service. Please check your internet connection."
            ),
            StargazerError::Status { provider, status } => {
                format!("The {provider} service rejected the request (HTTP {status}).")
            }
            StargazerError::InvalidResponse { provider, .. } => {
                format!("The {provider} service sent data we could not understand.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = StargazerError::config("missing API key");
        assert!(matches!(config_err, StargazerError::Config { .. }));

        let status_err = StargazerError::status(ProviderKind::Weather, 500);
        assert!(matches!(status_err, StargazerError::Status { status: 500, .. }));

        let validation_err = StargazerError::validation("empty place");
        assert!(matches!(validation_err, StargazerError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = StargazerError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let status_err = StargazerError::status(ProviderKind::TextGeneration, 429);
        assert!(status_err.user_message().contains("text generation"));
        assert!(status_err.user_message().contains("429"));

        let validation_err = StargazerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_display_names_provider() {
        let err = StargazerError::status(ProviderKind::Weather, 500);
        assert_eq!(err.to_string(), "weather provider returned HTTP 500");
    }

    #[tokio::test]
    async fn test_transport_error_hides_query_credentials() {
        let source = reqwest::Client::new()
            .get("http://127.0.0.1:1/forecast?q=Berlin&appid=SUPERSECRETWEATHERKEY")
            .send()
            .await
            .unwrap_err();
        let err = StargazerError::transport(ProviderKind::Weather, source);

        let message = err.to_string();
        assert!(message.starts_with("weather provider unreachable"));
        assert!(!message.contains("SUPERSECRETWEATHERKEY"), "leaked: {message}");
        assert!(!format!("{err:?}").contains("SUPERSECRETWEATHERKEY"));
    }
}
