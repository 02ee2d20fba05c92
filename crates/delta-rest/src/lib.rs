//! Delta Exchange REST API client.
//!
//! This crate provides a typed client for the Delta Exchange REST API with:
//!
//! - **Signed requests**: every authenticated call carries `api-key`, `signature`
//!   and `timestamp` headers computed right before sending
//! - **Wallet**: account balances per asset
//! - **Market data**: product listing
//! - **Order management**: place single or batched orders with a JSON body
//! - **Error handling**: Delta error envelopes decoded into typed errors
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ApiCredentials;
//! use delta_rest::DeltaRestClient;
//!
//! let credentials = ApiCredentials::from_env()?;
//! let client = DeltaRestClient::new(credentials)?;
//!
//! for balance in client.get_wallet_balances().await? {
//!     println!("{}: {}", balance.asset_symbol, balance.balance);
//! }
//! ```

mod client;
mod error;
pub mod operations;
mod responses;

pub use client::DeltaRestClient;
pub use error::DeltaRestError;
pub use operations::{operations_by_group, Operation, OPERATIONS};
pub use responses::{
    BatchOrderRequest, NewOrderRequest, OrderResponse, OrderSide, OrderType, Product,
    WalletBalance,
};
