//! HMAC-SHA256 request signing for the Delta Exchange API.

use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use crate::request::RequestBody;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request signer for authenticated Delta Exchange API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Sign a message and return the hex-encoded signature.
    ///
    /// This computes HMAC-SHA256 of the message using the API secret
    /// and returns the result as a lowercase hex string.
    pub fn sign_message(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(message.as_bytes());
        let result = mac.finalize();
        hex::encode(result.into_bytes())
    }

    /// Sign one request.
    ///
    /// The signed payload is `verb`, `timestamp`, `canonical_path` and the
    /// canonical body text concatenated with no separators.
    ///
    /// # Arguments
    /// * `verb` - Uppercase HTTP method; not normalized here
    /// * `canonical_path` - Path plus `?query`, without scheme or host
    /// * `timestamp` - Unix seconds, the same value sent in the `timestamp` header
    /// * `body` - Request body
    ///
    /// # Errors
    /// Returns `AuthError::InvalidInput` if the body cannot be serialized.
    pub fn sign(
        &self,
        verb: &str,
        canonical_path: &str,
        timestamp: u64,
        body: &RequestBody,
    ) -> Result<String, AuthError> {
        let payload = signing_payload(verb, canonical_path, timestamp, body)?;
        Ok(self.sign_message(&payload))
    }
}

/// Build the exact string that gets signed for a request.
pub fn signing_payload(
    verb: &str,
    canonical_path: &str,
    timestamp: u64,
    body: &RequestBody,
) -> Result<String, AuthError> {
    let body = body.canonicalize()?;
    Ok(format!("{verb}{timestamp}{canonical_path}{body}"))
}
