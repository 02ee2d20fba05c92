//! Header-based request authentication.
//!
//! [`AuthenticationHandler`] is invoked by the dispatch layer once per outgoing
//! call, right before the request is sent. It signs the request and adds the
//! `api-key`, `signature` and `timestamp` headers; nothing else on the request
//! is touched.

use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use crate::request::OutgoingRequest;
use crate::signer::RequestSigner;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// Header carrying the public API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Header carrying the hex HMAC signature.
pub const SIGNATURE_HEADER: &str = "signature";

/// Header carrying the Unix timestamp (seconds) that was signed.
pub const TIMESTAMP_HEADER: &str = "timestamp";

/// Source of the signing timestamp.
pub trait Clock: Send + Sync {
    /// Current time in whole seconds since the Unix epoch.
    fn now_secs(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// A clock frozen at a given second.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_secs(&self) -> u64 {
        self.0
    }
}

/// Receives the canonical path and signature of every signed request.
pub trait SigningObserver: Send + Sync {
    /// Called after a request has been signed.
    fn on_signed(&self, canonical_path: &str, signature: &str);
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SigningObserver for NoopObserver {
    fn on_signed(&self, _canonical_path: &str, _signature: &str) {}
}

/// Observer that emits a debug event per signed request.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SigningObserver for TracingObserver {
    fn on_signed(&self, canonical_path: &str, signature: &str) {
        tracing::debug!(path = %canonical_path, signature = %signature, "Request signed");
    }
}

/// An authorization step applied to a request before it is sent.
pub trait Authorize: Send + Sync {
    /// Authorize `request` in place and report whether the step applied.
    fn apply(&self, request: &mut OutgoingRequest) -> Result<bool, AuthError>;
}

/// Signs outgoing requests with one set of credentials.
#[derive(Clone)]
pub struct AuthenticationHandler {
    credentials: ApiCredentials,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn SigningObserver>,
}

impl AuthenticationHandler {
    /// Create a handler using the system clock and no diagnostics.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            credentials,
            clock: Arc::new(SystemClock),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the clock used for timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the diagnostics observer.
    pub fn with_observer(mut self, observer: impl SigningObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign `request` and add the authentication headers.
    ///
    /// The clock is read exactly once; the same value is signed and sent in
    /// the `timestamp` header.
    ///
    /// # Errors
    /// - `AuthError::InvalidRequest` if the method is missing or the URL does not
    ///   parse. Headers are left untouched in that case.
    /// - `AuthError::InvalidInput` if the body cannot be serialized.
    pub fn apply(&self, request: &mut OutgoingRequest) -> Result<bool, AuthError> {
        let verb = match request.method.as_deref().map(str::trim) {
            Some(method) if !method.is_empty() => method.to_uppercase(),
            _ => return Err(AuthError::InvalidRequest("missing HTTP method".into())),
        };
        let path = canonical_path(&request.url)?;
        let timestamp = self.clock.now_secs();

        let signature =
            RequestSigner::new(&self.credentials).sign(&verb, &path, timestamp, &request.body)?;

        self.observer.on_signed(&path, &signature);

        request
            .headers
            .insert(API_KEY_HEADER.to_string(), self.credentials.api_key().to_string());
        request
            .headers
            .insert(SIGNATURE_HEADER.to_string(), signature);
        request
            .headers
            .insert(TIMESTAMP_HEADER.to_string(), timestamp.to_string());

        Ok(true)
    }
}

impl Authorize for AuthenticationHandler {
    fn apply(&self, request: &mut OutgoingRequest) -> Result<bool, AuthError> {
        AuthenticationHandler::apply(self, request)
    }
}

impl std::fmt::Debug for AuthenticationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationHandler")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Extract the path and query (with its leading `?`) from an absolute URL.
///
/// # Errors
/// Returns `AuthError::InvalidRequest` if `url` is not an absolute URL.
pub fn canonical_path(url: &str) -> Result<String, AuthError> {
    let parsed = Url::parse(url)
        .map_err(|e| AuthError::InvalidRequest(format!("invalid url '{url}': {e}")))?;

    let mut path = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        path.push('?');
        path.push_str(query);
    }
    Ok(path)
}
