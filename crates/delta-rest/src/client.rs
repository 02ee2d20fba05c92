//! Delta Exchange REST API client.

use crate::error::DeltaRestError;
use crate::operations::{
    Operation, GET_PRODUCTS, GET_WALLET_BALANCES, PLACE_BATCH_ORDERS, PLACE_ORDER,
};
use crate::responses::{
    BatchOrderRequest, Envelope, NewOrderRequest, OrderResponse, Product, WalletBalance,
};
use auth::{
    ApiCredentials, AuthenticationHandler, Authorize, OutgoingRequest, RequestBody,
    TracingObserver,
};
use common::DeltaEnvironment;
use rest_client::RestClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Request timeout for Delta API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delta Exchange REST API client.
///
/// Holds one base URL and one authorizer; every authenticated call is signed
/// right before it is sent.
pub struct DeltaRestClient {
    client: RestClient,
    authorizer: Box<dyn Authorize>,
}

impl DeltaRestClient {
    /// Create a new client for production.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials) -> Result<Self, DeltaRestError> {
        Self::with_environment(credentials, DeltaEnvironment::Production)
    }

    /// Create a new client for a specific environment.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_environment(
        credentials: ApiCredentials,
        environment: DeltaEnvironment,
    ) -> Result<Self, DeltaRestError> {
        Self::with_base_url(credentials, environment.rest_base_url())
    }

    /// Create a new client against an explicit base URL (mirrors, local servers).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(
        credentials: ApiCredentials,
        base_url: &str,
    ) -> Result<Self, DeltaRestError> {
        let handler = AuthenticationHandler::new(credentials).with_observer(TracingObserver);
        Self::with_authorizer(base_url, handler)
    }

    /// Create a new client with a custom authorization step.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_authorizer(
        base_url: &str,
        authorizer: impl Authorize + 'static,
    ) -> Result<Self, DeltaRestError> {
        let client = RestClient::new(base_url, REQUEST_TIMEOUT)?;

        Ok(Self {
            client,
            authorizer: Box::new(authorizer),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    // ========================================================================
    // Wallet
    // ========================================================================

    /// Get balances for every asset in the wallet.
    ///
    /// GET /v2/wallet/balances
    pub async fn get_wallet_balances(&self) -> Result<Vec<WalletBalance>, DeltaRestError> {
        let balances: Vec<WalletBalance> = self
            .send_signed(&GET_WALLET_BALANCES, None, RequestBody::Empty)
            .await?;

        tracing::debug!(assets = balances.len(), "Wallet balances received");
        Ok(balances)
    }

    // ========================================================================
    // Market Data
    // ========================================================================

    /// List tradable products. Public, unsigned.
    ///
    /// GET /v2/products
    pub async fn get_products(&self) -> Result<Vec<Product>, DeltaRestError> {
        let envelope: Envelope<Vec<Product>> = self
            .client
            .get(GET_PRODUCTS.path, None)
            .await
            .map_err(DeltaRestError::from_rest)?;

        envelope.into_result()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Place a new order.
    ///
    /// POST /v2/orders
    pub async fn place_order(
        &self,
        order: &NewOrderRequest,
    ) -> Result<OrderResponse, DeltaRestError> {
        let body = RequestBody::json(order)?;

        tracing::info!(
            product_id = order.product_id,
            side = ?order.side,
            order_type = ?order.order_type,
            size = order.size,
            "Placing order"
        );

        let response: OrderResponse = self.send_signed(&PLACE_ORDER, None, body).await?;

        tracing::info!(order_id = response.id, state = %response.state, "Order placed");
        Ok(response)
    }

    /// Place several orders on one product in a single signed request.
    ///
    /// POST /v2/orders/batch
    pub async fn place_batch_orders(
        &self,
        batch: &BatchOrderRequest,
    ) -> Result<Vec<OrderResponse>, DeltaRestError> {
        let body = RequestBody::json(batch)?;

        tracing::info!(
            product_id = batch.product_id,
            orders = batch.len(),
            "Placing batch orders"
        );

        let responses: Vec<OrderResponse> =
            self.send_signed(&PLACE_BATCH_ORDERS, None, body).await?;

        tracing::info!(placed = responses.len(), "Batch orders placed");
        Ok(responses)
    }

    /// Build, sign and send one request, then unwrap the response envelope.
    ///
    /// The body text sent on the wire is the same text that was signed.
    async fn send_signed<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        query: Option<&str>,
        body: RequestBody,
    ) -> Result<T, DeltaRestError> {
        let url = self.client.build_url(operation.path, query);
        let mut request = OutgoingRequest::new(operation.method, url).with_body(body);

        self.authorizer.apply(&mut request)?;

        let body = if request.body.is_empty() {
            None
        } else {
            Some(request.body.canonicalize()?)
        };

        let envelope: Envelope<T> = self
            .client
            .send(operation.method, &request.url, &request.headers, body)
            .await
            .map_err(DeltaRestError::from_rest)?;

        envelope.into_result()
    }
}

impl std::fmt::Debug for DeltaRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeltaRestClient")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_base_url() {
        let creds = ApiCredentials::new("key", "secret");
        let client = DeltaRestClient::with_environment(creds, DeltaEnvironment::Testnet).unwrap();
        assert_eq!(client.base_url(), "https://testnet-api.delta.exchange");
    }

    #[test]
    fn test_custom_base_url() {
        let creds = ApiCredentials::new("key", "secret");
        let client = DeltaRestClient::with_base_url(creds, "http://192.168.56.1:8080/").unwrap();
        assert_eq!(client.base_url(), "http://192.168.56.1:8080");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let creds = ApiCredentials::new("key", "super_secret_key");
        let client = DeltaRestClient::new(creds).unwrap();
        let debug_str = format!("{:?}", client);

        assert!(debug_str.contains("https://api.delta.exchange"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
