use std::sync::Arc;

use super::order_id::OrderIdAllocator;
use super::services::{EngineForwarder, OrderService};

/// Gateway application state (shared by every request)
#[derive(Clone)]
pub struct AppState {
    /// Order ID generator, the only mutable shared state
    order_ids: Arc<OrderIdAllocator>,
    /// Matching engine client
    engine: EngineForwarder,
}

impl AppState {
    pub fn new(order_ids: OrderIdAllocator, engine: EngineForwarder) -> Self {
        Self {
            order_ids: Arc::new(order_ids),
            engine,
        }
    }

    pub fn order_service(&self) -> OrderService<'_> {
        OrderService::new(&self.order_ids, &self.engine)
    }
}
