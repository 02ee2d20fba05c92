//! Generic REST client wrapper around reqwest.

use crate::error::RestError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Generic REST client for making HTTP requests.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://api.delta.exchange")
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an unauthenticated GET request.
    ///
    /// # Arguments
    /// * `path` - Request path (e.g., "/v2/products")
    /// * `query` - Optional query string (without leading '?')
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<T, RestError> {
        let url = self.build_url(path, query);
        self.send("GET", &url, &HashMap::new(), None).await
    }

    /// Send a fully prepared request.
    ///
    /// The URL, headers and body are sent exactly as given, so a signature
    /// computed over them stays valid on the wire.
    ///
    /// # Arguments
    /// * `method` - HTTP method, any case
    /// * `url` - Absolute URL, usually from [`RestClient::build_url`]
    /// * `headers` - Headers to attach
    /// * `body` - JSON body text, if any
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<T, RestError> {
        let method = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut request = self.client.request(method, url);

        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if let Some(body) = body {
            if needs_json_content_type(headers) {
                request = request.header(CONTENT_TYPE, "application/json");
            }
            request = request.body(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Build a full URL from path and optional query string.
    pub fn build_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// Handle HTTP response and deserialize JSON body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, RestError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                tracing::warn!(body = %body, error = %e, "Failed to parse response");
                RestError::Parse(e.to_string())
            })
        } else {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                let retry_after_ms = body_retry_after_ms(&body).unwrap_or(60_000);
                return Err(RestError::RateLimited { retry_after_ms });
            }

            Err(RestError::HttpError {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

/// True unless the caller already set a content type, in any case.
fn needs_json_content_type(headers: &HashMap<String, String>) -> bool {
    !headers
        .keys()
        .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
}

/// Read a reset hint from a rate-limit body, if the server sent one.
fn body_retry_after_ms(body: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/context/reset_time_ms")
        .or_else(|| value.get("retry_after_ms"))
        .and_then(serde_json::Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_no_query() {
        let client = RestClient::with_default_timeout("https://api.delta.exchange").unwrap();
        assert_eq!(
            client.build_url("/v2/products", None),
            "https://api.delta.exchange/v2/products"
        );
    }

    #[test]
    fn test_build_url_with_query() {
        let client = RestClient::with_default_timeout("https://api.delta.exchange").unwrap();
        assert_eq!(
            client.build_url("/v2/orders", Some("product_id=27&state=open")),
            "https://api.delta.exchange/v2/orders?product_id=27&state=open"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let client = RestClient::with_default_timeout("http://192.168.56.1:8080/").unwrap();
        assert_eq!(client.base_url(), "http://192.168.56.1:8080");
        assert_eq!(
            client.build_url("/v2/wallet/balances", None),
            "http://192.168.56.1:8080/v2/wallet/balances"
        );
    }

    #[test]
    fn test_build_url_empty_query() {
        let client = RestClient::with_default_timeout("https://api.delta.exchange").unwrap();
        assert_eq!(
            client.build_url("/v2/products", Some("")),
            "https://api.delta.exchange/v2/products"
        );
    }

    #[test]
    fn test_retry_after_from_body() {
        assert_eq!(
            body_retry_after_ms(
                r#"{"error":{"code":"ratelimited","context":{"reset_time_ms":1500}}}"#
            ),
            Some(1500)
        );
        assert_eq!(body_retry_after_ms(r#"{"retry_after_ms":250}"#), Some(250));
        assert_eq!(body_retry_after_ms("Too Many Requests"), None);
    }

    #[test]
    fn test_json_content_type_added_by_default() {
        let mut headers = HashMap::new();
        headers.insert("api-key".to_string(), "key".to_string());
        assert!(needs_json_content_type(&headers));
    }

    #[test]
    fn test_caller_content_type_is_kept() {
        for name in ["content-type", "Content-Type"] {
            let mut headers = HashMap::new();
            headers.insert(name.to_string(), "text/plain".to_string());
            assert!(!needs_json_content_type(&headers), "{name}");
        }
    }
}
