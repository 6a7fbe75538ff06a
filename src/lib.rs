//! Order Gateway
//!
//! Request intake in front of an order-matching engine: validates order
//! operations, assigns order IDs and relays them to the engine.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (OrderId, Price, Quantity)
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup
//! - [`gateway`] - HTTP surface, validation, translation and forwarding

// Core types - must be first!
pub mod core_types;

pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use config::{AppConfig, ConfigError};
pub use core_types::{OrderId, Price, Quantity};
pub use gateway::error::{ForwardError, GatewayError, ValidationError};
pub use gateway::order_id::OrderIdAllocator;
pub use gateway::services::{EngineForwarder, EngineResponse, OrderService};
pub use gateway::types::{
    CancelRequest, EngineForm, ErrorEnvelope, OrderRequest, Side, TradeType, decode_cancel,
    decode_order,
};
