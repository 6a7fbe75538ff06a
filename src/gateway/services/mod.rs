//! Service layer
//!
//! Business logic for order operations, separated from HTTP handlers.

pub mod forward;
pub mod order;

pub use forward::{EngineForwarder, EngineResponse};
pub use order::{OrderService, PlacedOrder};
