//! Secure API credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the API secret
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the public API key.
pub const API_KEY_ENV: &str = "DELTA_API_KEY";

/// Environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "DELTA_API_SECRET";

/// API credentials for authenticated requests.
///
/// The secret is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: SecretString,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `DELTA_API_KEY` - The API key (public)
    /// - `DELTA_API_SECRET` - The API secret (private)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| AuthError::MissingEnvVar(API_KEY_ENV.into()))?;

        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::MissingEnvVar(API_SECRET_ENV.into()))?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Create credentials from explicit values.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
