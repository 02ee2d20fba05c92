//! Authentication and signing for the Delta Exchange API.
//!
//! This crate provides secure credential management and request signing
//! for authenticated API calls.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets are wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **HMAC-SHA256 Signing**: Signs `METHOD + timestamp + path?query + body` and
//!   hex-encodes the result.
//! - **Header Injection**: `AuthenticationHandler` adds the `api-key`, `signature`
//!   and `timestamp` headers to an outgoing request right before it is sent.
//! - **Environment Loading**: Credentials can be loaded from environment variables
//!   or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, AuthenticationHandler, OutgoingRequest};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let handler = AuthenticationHandler::new(credentials);
//!
//! let mut request = OutgoingRequest::new("GET", "https://api.delta.exchange/v2/wallet/balances");
//! handler.apply(&mut request)?;
//!
//! assert!(request.headers.contains_key("signature"));
//! ```

mod credentials;
mod error;
mod handler;
mod request;
mod signer;

pub use credentials::{ApiCredentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::AuthError;
pub use handler::{
    canonical_path, AuthenticationHandler, Authorize, Clock, FixedClock, NoopObserver,
    SigningObserver, SystemClock, TracingObserver, API_KEY_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
pub use request::{OutgoingRequest, RequestBody};
pub use signer::{signing_payload, RequestSigner};
