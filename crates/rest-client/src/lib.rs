//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - Sending of pre-signed requests exactly as they were signed
//! - JSON response deserialization
//! - Rate limit detection
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::RestClient;
//! use serde_json::Value;
//!
//! let client = RestClient::with_default_timeout("https://api.delta.exchange")?;
//! let products: Value = client.get("/v2/products", None).await?;
//! ```

mod client;
mod error;

pub use client::RestClient;
pub use error::RestError;
