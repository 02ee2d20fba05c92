//! Delta Exchange REST API error types.

use auth::AuthError;
use rest_client::RestError;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Delta Exchange REST API.
#[derive(Debug, Error)]
pub enum DeltaRestError {
    /// REST client error (network, timeout, etc.).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// The request could not be signed.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The server rejected the request timestamp as too old or too far ahead.
    #[error("Signature expired (server time {server_time:?})")]
    SignatureExpired {
        /// Server clock in seconds, when reported.
        server_time: Option<u64>,
    },

    /// The server computed a different signature.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The API key is unknown, disabled or not allowed from this IP.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Not enough margin for the order.
    #[error("Insufficient margin")]
    InsufficientMargin,

    /// Any other error returned by the exchange.
    #[error("Delta API error {code}: {context}")]
    ApiError {
        /// Delta error code.
        code: String,
        /// Error context as returned, serialized.
        context: String,
    },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

impl DeltaRestError {
    /// Parse a Delta error response.
    ///
    /// Delta returns errors in the format:
    /// `{"success": false, "error": {"code": "...", "context": {...}}}`
    pub fn from_api_response(body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorEnvelope {
            error: ApiErrorBody,
        }

        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self::classify_api_error(envelope.error),
            Err(_) => Self::Parse(format!("Failed to parse error response: {}", body)),
        }
    }

    /// Map a REST failure, decoding the exchange error body when there is one.
    pub(crate) fn from_rest(err: RestError) -> Self {
        let classified = err
            .body()
            .filter(|body| body.contains("\"error\""))
            .map(Self::from_api_response);

        match classified {
            Some(api_err) if !matches!(api_err, Self::Parse(_)) => api_err,
            _ => Self::Rest(err),
        }
    }

    /// Classify a Delta error code into a more specific error.
    pub(crate) fn classify_api_error(error: ApiErrorBody) -> Self {
        let context = error
            .context
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_default();

        match error.code.as_str() {
            "expired_signature" => Self::SignatureExpired {
                server_time: error
                    .context
                    .as_ref()
                    .and_then(|c| c.get("server_time"))
                    .and_then(serde_json::Value::as_u64),
            },
            "Signature Mismatch" | "signature_mismatch" => Self::SignatureMismatch,
            "invalid_api_key" | "unauthorized" | "ip_not_whitelisted_for_api_key" => {
                Self::Unauthorized(error.code)
            }
            "insufficient_margin" | "InsufficientMargin" => Self::InsufficientMargin,
            _ => Self::ApiError {
                code: error.code,
                context,
            },
        }
    }

    /// Check if this error indicates the operation should be retried.
    ///
    /// An expired signature is retryable because the next attempt is signed
    /// with a fresh timestamp.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rest(rest_err) => rest_err.is_retryable(),
            Self::SignatureExpired { .. } => true,
            _ => false,
        }
    }
}
