//! HTTP handlers
//!
//! - [`order`]: trade, cancel and engine status (proxied to the engine)
//! - [`health`]: local liveness

pub mod health;
pub mod order;

pub use health::*;
pub use order::*;
