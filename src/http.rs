//! HTTP plumbing shared by the provider clients
//!
//! Every provider call is one request with a bounded timeout. There is no
//! retry: a transport error or non-success status is returned to the caller,
//! which turns it into an absent value.

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{ProviderKind, Result, StargazerError};

const USER_AGENT: &str = concat!("stargazer/", env!("CARGO_PKG_VERSION"));

/// Responses slower than this are logged as warnings
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Query parameters whose values must never reach the logs
const SECRET_PARAMS: [&str; 3] = ["key=", "appid=", "api_key="];

/// Build an HTTP client with the given per-request timeout
pub fn build_client(provider: ProviderKind, timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| StargazerError::transport(provider, e))
}

/// Send a prepared request and decode a JSON body from a 2xx response
pub async fn send_json<T: DeserializeOwned>(
    provider: ProviderKind,
    request: RequestBuilder,
) -> Result<T> {
    let start_time = Instant::now();

    let response = request
        .send()
        .await
        .map_err(|e| StargazerError::transport(provider, e))?;

    let status = response.status();
    debug!(
        "{} response: {} in {:.3}s",
        provider,
        status,
        start_time.elapsed().as_secs_f64()
    );

    if !status.is_success() {
        warn!("{} request failed with status {}", provider, status);
        return Err(StargazerError::status(provider, status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| StargazerError::transport(provider, e))?;

    let parsed = serde_json::from_str(&body).map_err(|e| {
        StargazerError::invalid_response(provider, format!("failed to parse body: {e}"))
    })?;

    let total_duration = start_time.elapsed();
    if total_duration > SLOW_RESPONSE {
        warn!(
            "Slow {} response: {:.3}s",
            provider,
            total_duration.as_secs_f64()
        );
    } else {
        info!(
            "{} request succeeded in {:.3}s",
            provider,
            total_duration.as_secs_f64()
        );
    }

    Ok(parsed)
}

/// Strip credential values from a URL before logging it
#[must_use]
pub fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|param| {
            match SECRET_PARAMS
                .iter()
                .find(|secret| param.starts_with(**secret))
            {
                Some(secret) => format!("{secret}***"),
                None => param.to_string(),
            }
        })
        .collect();

    format!("{base}?{}", params.join("&"))
}


#[cfg(test)]
mod tests {
    use super::testing::{http_response, serve_once};
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        results: Vec<String>,
    }

    fn client() -> Client {
        build_client(ProviderKind::Geocoding, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let base_url = serve_once(http_response("500 Internal Server Error", "{}")).await;
        let result: Result<Payload> =
            send_json(ProviderKind::Weather, client().get(format!("{base_url}/forecast"))).await;

        assert!(matches!(
            result,
            Err(StargazerError::Status {
                provider: ProviderKind::Weather,
                status: 500
            })
        ));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_invalid_response() {
        let base_url = serve_once(http_response("200 OK", "<html>maintenance</html>")).await;
        let result: Result<Payload> =
            send_json(ProviderKind::Geocoding, client().get(format!("{base_url}/json"))).await;

        assert!(matches!(
            result,
            Err(StargazerError::InvalidResponse {
                provider: ProviderKind::Geocoding,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let base_url = serve_once(http_response("200 OK", r#"{"results": ["a", "b"]}"#)).await;
        let payload: Payload =
            send_json(ProviderKind::Geocoding, client().get(format!("{base_url}/json")))
                .await
                .unwrap();

        assert_eq!(payload.results, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_unreachable_error_hides_key() {
        let request = client().get("http://127.0.0.1:1/json?q=Berlin&key=SUPERSECRETGEOKEY");
        let err = send_json::<Payload>(ProviderKind::Geocoding, request)
            .await
            .unwrap_err();

        assert!(matches!(err, StargazerError::Transport { .. }));
        assert!(!err.to_string().contains("SUPERSECRETGEOKEY"));
    }

    #[test]
    fn test_redact_hides_credentials() {
        let url = "https://api.openweathermap.org/data/2.5/forecast?q=Berlin&appid=secret123&units=metric";
        assert_eq!(
            redact(url),
            "https://api.openweathermap.org/data/2.5/forecast?q=Berlin&appid=***&units=metric"
        );

        let url = "https://api.opencagedata.com/geocode/v1/json?q=Berlin&key=abc";
        assert_eq!(
            redact(url),
            "https://api.opencagedata.com/geocode/v1/json?q=Berlin&key=***"
        );
    }

    #[test]
    fn test_redact_without_query() {
        assert_eq!(
            redact("https://api.openai.com/v1/completions"),
            "https://api.openai.com/v1/completions"
        );
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(ProviderKind::Weather, Duration::from_secs(1)).is_ok());
    }
}
