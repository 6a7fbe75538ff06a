//! Order request decoding and validation
//!
//! - `ClientOrder` / `ClientCancel`: HTTP body deserialization
//! - `OrderRequest` / `CancelRequest`: validated, typed requests
//! - `decode_order` / `decode_cancel`: bytes in, validated request out
//!
//! Decoding never touches shared state: a request that fails here has not
//! consumed an order ID and never reaches the engine.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::core_types::{OrderId, Price, Quantity, UNSET_ORDER_ID};
use crate::gateway::error::ValidationError;

use super::amount::StrictUint;

// ============================================================================
// Side / TradeType
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Token the engine expects
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(ValidationError::UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the engine should treat the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeType {
    Limit,
    Market,
    /// Rests on the book until filled or cancelled
    GoodTillCancel,
    /// Fills what it can immediately, the remainder is dropped
    FillAndKill,
}

impl TradeType {
    /// Token the engine expects
    pub fn as_str(self) -> &'static str {
        match self {
            TradeType::Limit => "limit",
            TradeType::Market => "market",
            TradeType::GoodTillCancel => "GTC",
            TradeType::FillAndKill => "FAK",
        }
    }
}

impl FromStr for TradeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "limit" => Ok(TradeType::Limit),
            "market" => Ok(TradeType::Market),
            "gtc" => Ok(TradeType::GoodTillCancel),
            "fak" => Ok(TradeType::FillAndKill),
            _ => Err(ValidationError::UnknownTradeType(s.to_string())),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

/// New order body: `{type, side, price, quantity, name}`
///
/// Only the format is checked here; field rules are applied by
/// [`ClientOrder::validate`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClientOrder {
    /// limit | market | gtc | fak
    #[serde(rename = "type")]
    #[schema(example = "limit")]
    pub trade_type: String,
    /// buy | sell
    #[schema(example = "buy")]
    pub side: String,
    /// Integer price in ticks, as a number or a digit string
    #[schema(value_type = String, example = "100")]
    pub price: StrictUint,
    /// Integer quantity, as a number or a digit string
    #[schema(value_type = String, example = "5")]
    pub quantity: StrictUint,
    /// Book the order goes to
    #[schema(example = "BTC-USD")]
    pub name: String,
}

/// Cancel body: `{orderid, book}`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClientCancel {
    /// Absent is treated like zero, the unset id
    #[serde(default)]
    #[schema(example = 42)]
    pub orderid: OrderId,
    #[serde(default)]
    #[schema(example = "BTC-USD")]
    pub book: String,
}

// ============================================================================
// Validated requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub trade_type: TradeType,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub book: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelRequest {
    pub order_id: OrderId,
    pub book: String,
}

fn require_book(book: &str, field: &'static str) -> Result<String, ValidationError> {
    let book = book.trim();
    if book.is_empty() {
        return Err(ValidationError::EmptyBook(field));
    }
    Ok(book.to_string())
}

impl ClientOrder {
    pub fn validate(self) -> Result<OrderRequest, ValidationError> {
        let trade_type: TradeType = self.trade_type.parse()?;
        let side: Side = self.side.parse()?;
        let quantity = self.quantity.get();
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        let book = require_book(&self.name, "name")?;

        Ok(OrderRequest {
            trade_type,
            side,
            price: self.price.get(),
            quantity,
            book,
        })
    }
}

impl ClientCancel {
    pub fn validate(self) -> Result<CancelRequest, ValidationError> {
        if self.orderid == UNSET_ORDER_ID {
            return Err(ValidationError::MissingOrderId);
        }
        let book = require_book(&self.book, "book")?;

        Ok(CancelRequest {
            order_id: self.orderid,
            book,
        })
    }
}

fn malformed(e: serde_json::Error) -> ValidationError {
    ValidationError::Malformed(e.to_string())
}

/// Decode and validate a new order body
pub fn decode_order(payload: &[u8]) -> Result<OrderRequest, ValidationError> {
    let client: ClientOrder = serde_json::from_slice(payload).map_err(malformed)?;
    client.validate()
}

/// Decode and validate a cancel body
pub fn decode_cancel(payload: &[u8]) -> Result<CancelRequest, ValidationError> {
    let client: ClientCancel = serde_json::from_slice(payload).map_err(malformed)?;
    client.validate()
}
