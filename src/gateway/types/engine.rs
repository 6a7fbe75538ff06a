//! Engine wire format
//!
//! Translation from validated requests to the flat key/value form the
//! matching engine reads. Pure and deterministic: the same request and
//! order ID always produce the same form, in the same key order.

use serde::Serialize;

use crate::core_types::OrderId;

use super::order::{CancelRequest, OrderRequest};

/// Engine endpoint an operation is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOperation {
    Trade,
    Cancel,
    Status,
}

impl EngineOperation {
    pub fn path(self) -> &'static str {
        match self {
            EngineOperation::Trade => "trade",
            EngineOperation::Cancel => "cancel",
            EngineOperation::Status => "status",
        }
    }
}

/// Flat, ordered key/value parameters. All values are strings; integers are
/// base-10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EngineForm(Vec<(&'static str, String)>);

impl EngineForm {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `application/x-www-form-urlencoded` body
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.0)
    }
}

/// Form for a new order. `order_id` is the ID the allocator assigned.
pub fn trade_form(order_id: OrderId, req: &OrderRequest) -> EngineForm {
    EngineForm(vec![
        ("orderid", order_id.to_string()),
        ("tradetype", req.trade_type.as_str().to_string()),
        ("side", req.side.as_str().to_string()),
        ("price", req.price.to_string()),
        ("quantity", req.quantity.to_string()),
        ("book", req.book.clone()),
    ])
}

/// Form for a cancel
pub fn cancel_form(req: &CancelRequest) -> EngineForm {
    EngineForm(vec![
        ("orderid", req.order_id.to_string()),
        ("book", req.book.clone()),
    ])
}
