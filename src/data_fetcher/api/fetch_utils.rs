//! Single-attempt upstream fetching and payload decoding

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::urls::build_url;
use crate::error::UpstreamError;

/// One attempt at an upstream request.
///
/// Implementations perform exactly one request and never retry; the retry
/// policy lives in [`RetryingTransport`](super::RetryingTransport).
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches `path` (relative to the API base URL) and returns the raw body.
    fn fetch_once(
        &self,
        path: &str,
        deadline: Duration,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

/// Production fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    api_domain: String,
}

impl HttpFetcher {
    pub fn new(client: Client, api_domain: impl Into<String>) -> Self {
        Self {
            client,
            api_domain: api_domain.into(),
        }
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch_once(&self, path: &str, deadline: Duration) -> Result<String, UpstreamError> {
        let url = build_url(&self.api_domain, path);

        let response = match self.client.get(&url).timeout(deadline).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Request failed for URL {}: {}", url, e);
                return Err(if e.is_timeout() {
                    UpstreamError::timeout(url, deadline)
                } else if e.is_connect() {
                    UpstreamError::connection(url, e.to_string())
                } else {
                    UpstreamError::request(e.to_string(), url)
                });
            }
        };

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            error!("HTTP {} - {} (URL: {})", status.as_u16(), reason, url);
            return Err(UpstreamError::from_status(status.as_u16(), reason, &url));
        }

        // Reading the body can itself run into the per-request timeout
        match response.text().await {
            Ok(text) => {
                debug!("Response length: {} bytes", text.len());
                Ok(text)
            }
            Err(e) if e.is_timeout() => Err(UpstreamError::timeout(url, deadline)),
            Err(e) => {
                error!("Failed to read response text from URL {}: {}", url, e);
                Err(UpstreamError::request(e.to_string(), url))
            }
        }
    }
}

/// Decodes a response body, classifying failures the way callers need them:
/// empty body, non-JSON body, or JSON of the wrong shape.
pub fn parse_payload<T: DeserializeOwned>(body: &str, path: &str) -> Result<T, UpstreamError> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse upstream response: {} (path: {})", e, path);
            let preview: String = body.chars().take(200).collect();
            debug!("Response text (first 200 chars): {preview}");

            let trimmed = body.trim_start();
            if trimmed.is_empty() {
                Err(UpstreamError::no_data("Response body is empty", path))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(UpstreamError::malformed_json(
                    "Response is not valid JSON",
                    path,
                ))
            } else {
                Err(UpstreamError::unexpected_structure(e.to_string(), path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data_fetcher::api::create_http_client;
    use crate::data_fetcher::models::CompetitionResponse;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    fn fetcher_for(server: &MockServer) -> HttpFetcher {
        let config = Config {
            api_domain: server.uri(),
            api_token: "test-token".to_string(),
            ..Config::default()
        };
        let client = create_http_client(&config).unwrap();
        HttpFetcher::new(client, config.api_domain)
    }

    #[tokio::test]
    async fn test_fetch_once_sends_auth_header() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions/PL"))
            .and(header("X-Auth-Token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"PL"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let body = fetcher_for(&mock_server)
            .fetch_once("/competitions/PL", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(body, r#"{"name":"PL"}"#);
    }

    #[tokio::test]
    async fn test_fetch_once_maps_status_codes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/limited"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let fetcher = fetcher_for(&mock_server);
        let deadline = Duration::from_secs(5);

        let missing = fetcher.fetch_once("/missing", deadline).await.unwrap_err();
        assert!(matches!(missing, UpstreamError::NotFound { .. }));

        let limited = fetcher.fetch_once("/limited", deadline).await.unwrap_err();
        assert!(matches!(limited, UpstreamError::RateLimit { .. }));

        let down = fetcher.fetch_once("/down", deadline).await.unwrap_err();
        assert!(matches!(
            down,
            UpstreamError::ServiceUnavailable { status: 503, .. }
        ));
        assert!(!down.is_timeout());
    }

    #[tokio::test]
    async fn test_fetch_once_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let err = fetcher_for(&mock_server)
            .fetch_once("/slow", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {err:?}");
    }

    #[test]
    fn test_parse_payload_classification() {
        let ok: CompetitionResponse = parse_payload(r#"{"name":"PL"}"#, "/c").unwrap();
        assert_eq!(ok.competition.name, "PL");

        let empty = parse_payload::<CompetitionResponse>("  ", "/c").unwrap_err();
        assert!(matches!(empty, UpstreamError::NoData { .. }));

        let html = parse_payload::<CompetitionResponse>("<html>", "/c").unwrap_err();
        assert!(matches!(html, UpstreamError::MalformedJson { .. }));

        let wrong = parse_payload::<CompetitionResponse>("[1,2]", "/c").unwrap_err();
        assert!(matches!(wrong, UpstreamError::UnexpectedStructure { .. }));
    }
}
