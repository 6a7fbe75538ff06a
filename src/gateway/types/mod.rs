//! Gateway types module
//!
//! ## Input Types
//! - [`StrictUint`]: integer amount accepted as a number or a digit string
//! - [`ClientOrder`] / [`ClientCancel`]: HTTP body deserialization
//! - [`OrderRequest`] / [`CancelRequest`]: validated requests
//!
//! ## Output Types
//! - [`EngineForm`]: key/value form sent to the matching engine
//! - [`ErrorEnvelope`]: error body returned to callers
//! - [`ApiResponse<T>`]: wrapper for gateway-owned endpoints
//!
//! ## Submodules
//! - [`amount`]: integer amount parsing
//! - [`order`]: decoding and validation
//! - [`engine`]: engine wire format
//! - [`response`]: error envelope and reporter

pub mod amount;
pub mod engine;
pub mod order;
pub mod response;

pub use amount::StrictUint;
pub use engine::{EngineForm, EngineOperation, cancel_form, trade_form};
pub use order::{
    CancelRequest, ClientCancel, ClientOrder, OrderRequest, Side, TradeType, decode_cancel,
    decode_order,
};
pub use response::{
    ApiResponse, ErrorEnvelope, INTERNAL_ERROR_MESSAGE, report_client_error,
    report_internal_error,
};
