//! Order Service - the intake pipeline for each operation
//!
//! decode/validate → (new orders only) allocate ID → translate → forward.
//! Kept apart from the HTTP handlers so it can be driven directly in tests.

use crate::core_types::OrderId;
use crate::gateway::error::GatewayError;
use crate::gateway::order_id::OrderIdAllocator;
use crate::gateway::types::{
    EngineForm, EngineOperation, cancel_form, decode_cancel, decode_order, trade_form,
};

use super::forward::{EngineForwarder, EngineResponse};

/// Result of a forwarded new order
#[derive(Debug)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub engine: EngineResponse,
}

/// Order Service - borrows the shared allocator and engine client
pub struct OrderService<'a> {
    order_ids: &'a OrderIdAllocator,
    engine: &'a EngineForwarder,
}

impl<'a> OrderService<'a> {
    pub fn new(order_ids: &'a OrderIdAllocator, engine: &'a EngineForwarder) -> Self {
        Self { order_ids, engine }
    }

    /// Place a new order.
    ///
    /// The ID is allocated only after the payload validated, and is consumed
    /// even if forwarding then fails.
    pub async fn place_order(&self, payload: &[u8]) -> Result<PlacedOrder, GatewayError> {
        let order = decode_order(payload)?;

        let order_id = self.order_ids.next();
        let form = trade_form(order_id, &order);

        tracing::info!(
            "[TRACE] Trade Order {}: {} {} {}@{} on {} -> engine",
            order_id,
            order.trade_type,
            order.side,
            order.quantity,
            order.price,
            order.book
        );
        let engine = self.forward(EngineOperation::Trade, &form).await?;
        tracing::info!(
            "[TRACE] Trade Order {}: engine answered {}",
            order_id,
            engine.status
        );

        Ok(PlacedOrder { order_id, engine })
    }

    /// Cancel an existing order
    pub async fn cancel_order(&self, payload: &[u8]) -> Result<EngineResponse, GatewayError> {
        let cancel = decode_cancel(payload)?;
        let form = cancel_form(&cancel);

        tracing::info!(
            "[TRACE] Cancel Order {}: book {} -> engine",
            cancel.order_id,
            cancel.book
        );
        let engine = self.forward(EngineOperation::Cancel, &form).await?;
        tracing::info!(
            "[TRACE] Cancel Order {}: engine answered {}",
            cancel.order_id,
            engine.status
        );

        Ok(engine)
    }

    /// Book summary straight from the engine
    pub async fn engine_status(&self) -> Result<EngineResponse, GatewayError> {
        Ok(self.engine.fetch_status().await?)
    }

    async fn forward(
        &self,
        op: EngineOperation,
        form: &EngineForm,
    ) -> Result<EngineResponse, GatewayError> {
        let body = form
            .encode()
            .map_err(|e| GatewayError::Translation(e.to_string()))?;
        Ok(self.engine.forward(op, body).await?)
    }
}
