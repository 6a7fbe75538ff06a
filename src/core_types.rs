//! Core types used throughout the gateway
//!
//! Type aliases shared by the intake pipeline. They give semantic meaning
//! to plain integers and leave room for future type evolution.

/// Order ID - assigned by the gateway, unique for the lifetime of the process.
///
/// # Constraints:
/// - **Never zero**: `0` is the "unset" sentinel and never refers to a real order
/// - **Immutable**: once issued, never changes and is never reissued
/// - **Increasing**: a later allocation is always larger than an earlier one
pub type OrderId = u64;

/// Price in the smallest tick unit of the book
pub type Price = u64;

/// Quantity in the smallest lot unit of the book
pub type Quantity = u64;

/// The reserved "no order" identifier
pub const UNSET_ORDER_ID: OrderId = 0;
