//! Delta Exchange API request and response types.

use crate::error::{ApiErrorBody, DeltaRestError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Standard Delta response wrapper.
///
/// Successful calls look like `{"success": true, "result": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl<T> Envelope<T> {
    /// Unwrap the result, turning a `success: false` body into an error.
    pub fn into_result(self) -> Result<T, DeltaRestError> {
        match (self.success, self.result, self.error) {
            (true, Some(result), _) => Ok(result),
            (_, _, Some(error)) => Err(DeltaRestError::classify_api_error(error)),
            (true, None, None) => Err(DeltaRestError::Parse("missing result".into())),
            (false, _, None) => Err(DeltaRestError::Parse(
                "request failed without error details".into(),
            )),
        }
    }
}

/// One asset balance from GET /v2/wallet/balances.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletBalance {
    pub asset_id: u64,
    pub asset_symbol: String,
    #[serde(deserialize_with = "deserialize_decimal_from_str")]
    pub balance: Decimal,
    #[serde(deserialize_with = "deserialize_decimal_from_str")]
    pub available_balance: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_from_str")]
    pub order_margin: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_from_str")]
    pub position_margin: Decimal,
}

/// A tradable contract from GET /v2/products.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: u64,
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    pub contract_type: String,
    #[serde(default)]
    pub state: String,
    #[serde(deserialize_with = "deserialize_decimal_from_str")]
    pub tick_size: Decimal,
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    LimitOrder,
    MarketOrder,
}

/// Body of POST /v2/orders.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderRequest {
    pub product_id: u64,
    pub size: u64,
    pub side: OrderSide,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
}

impl NewOrderRequest {
    /// A limit order.
    pub fn limit(product_id: u64, side: OrderSide, size: u64, limit_price: Decimal) -> Self {
        Self {
            product_id,
            size,
            side,
            order_type: OrderType::LimitOrder,
            limit_price: Some(limit_price),
            client_order_id: None,
        }
    }

    /// A market order.
    pub fn market(product_id: u64, side: OrderSide, size: u64) -> Self {
        Self {
            product_id,
            size,
            side,
            order_type: OrderType::MarketOrder,
            limit_price: None,
            client_order_id: None,
        }
    }

    /// Tag the order with a client order ID.
    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }
}

/// Body of POST /v2/orders/batch: several orders on one product.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOrderRequest {
    pub product_id: u64,
    pub orders: Vec<NewOrderRequest>,
}

impl BatchOrderRequest {
    /// An empty batch for one product.
    pub fn new(product_id: u64) -> Self {
        Self {
            product_id,
            orders: Vec::new(),
        }
    }

    /// Append an order. Its product ID is forced to the batch's.
    pub fn with_order(mut self, mut order: NewOrderRequest) -> Self {
        order.product_id = self.product_id;
        self.orders.push(order);
        self
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Response from POST /v2/orders.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub id: u64,
    pub product_id: u64,
    pub size: u64,
    pub unfilled_size: u64,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub state: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_from_str")]
    pub limit_price: Option<Decimal>,
    #[serde(default)]
    pub client_order_id: Option<String>,
}

fn deserialize_decimal_from_str<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    s.parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal_from_str<'de, D>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    s.map(|s| s.parse::<Decimal>().map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_wallet_balances() {
        let json = r#"{
            "success": true,
            "result": [
                {
                    "asset_id": 2,
                    "asset_symbol": "BTC",
                    "balance": "0.50000000",
                    "available_balance": "0.42000000",
                    "order_margin": "0.03",
                    "position_margin": "0.05",
                    "commission": "0"
                },
                {
                    "asset_id": 3,
                    "asset_symbol": "USDT",
                    "balance": "1000",
                    "available_balance": "1000"
                }
            ]
        }"#;
        let envelope: Envelope<Vec<WalletBalance>> = serde_json::from_str(json).unwrap();
        let balances = envelope.into_result().unwrap();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].asset_symbol, "BTC");
        assert_eq!(balances[0].balance, dec!(0.5));
        assert_eq!(balances[0].available_balance, dec!(0.42));
        assert_eq!(balances[0].position_margin, dec!(0.05));
        assert_eq!(balances[1].order_margin, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_product() {
        let json = r#"{
            "id": 27,
            "symbol": "BTCUSD",
            "description": "Bitcoin Perpetual futures, quoted, settled & margined in USD",
            "contract_type": "perpetual_futures",
            "state": "live",
            "tick_size": "0.5"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 27);
        assert_eq!(product.symbol, "BTCUSD");
        assert_eq!(product.tick_size, dec!(0.5));
    }

    #[test]
    fn test_serialize_limit_order() {
        let order = NewOrderRequest::limit(27, OrderSide::Buy, 10, dec!(25000.5))
            .with_client_order_id("my_order_1");
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["product_id"], 27);
        assert_eq!(json["side"], "buy");
        assert_eq!(json["order_type"], "limit_order");
        assert_eq!(json["limit_price"], "25000.5");
        assert_eq!(json["client_order_id"], "my_order_1");
    }

    #[test]
    fn test_serialize_market_order_omits_price() {
        let order = NewOrderRequest::market(27, OrderSide::Sell, 1);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["order_type"], "market_order");
        assert!(json.get("limit_price").is_none());
        assert!(json.get("client_order_id").is_none());
    }

    #[test]
    fn test_deserialize_order_response() {
        let json = r#"{
            "id": 123456,
            "product_id": 27,
            "size": 10,
            "unfilled_size": 10,
            "side": "buy",
            "order_type": "limit_order",
            "state": "open",
            "limit_price": "25000.5",
            "client_order_id": null
        }"#;
        let order: OrderResponse = serde_json::from_str(json).unwrap();

        assert_eq!(order.id, 123456);
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.limit_price, Some(dec!(25000.5)));
        assert!(order.client_order_id.is_none());
    }

    #[test]
    fn test_failed_envelope_is_classified() {
        let json = r#"{"success": false, "error": {"code": "insufficient_margin"}}"#;
        let envelope: Envelope<Vec<WalletBalance>> = serde_json::from_str(json).unwrap();

        assert!(matches!(
            envelope.into_result(),
            Err(DeltaRestError::InsufficientMargin)
        ));
    }

    #[test]
    fn test_batch_body_carries_an_order_array() {
        let batch = BatchOrderRequest::new(27)
            .with_order(NewOrderRequest::limit(27, OrderSide::Buy, 5, dec!(25000)))
            .with_order(NewOrderRequest::market(99, OrderSide::Sell, 3));

        let value = serde_json::to_value(&batch).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(value["product_id"], 27);
        assert_eq!(value["orders"][0]["limit_price"], "25000");
        assert_eq!(value["orders"][1]["product_id"], 27);
        assert_eq!(value["orders"][1]["order_type"], "market_order");
        assert!(value["orders"][1].get("limit_price").is_none());
    }

    #[test]
    fn test_success_without_result() {
        let envelope: Envelope<Vec<Product>> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(envelope.into_result(), Err(DeltaRestError::Parse(_))));
    }
}
