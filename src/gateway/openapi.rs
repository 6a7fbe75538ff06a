//! OpenAPI documentation
//!
//! Generated from the handler annotations. Export it with the
//! `export_openapi` binary.

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{ClientCancel, ClientOrder, ErrorEnvelope};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Gateway API",
        version = "1.0.0",
        description = "Order intake gateway. Validates orders, assigns order IDs and relays them to the matching engine.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::engine_status,
        crate::gateway::handlers::trade,
        crate::gateway::handlers::cancel,
    ),
    components(
        schemas(
            HealthResponse,
            ClientOrder,
            ClientCancel,
            ErrorEnvelope,
        )
    ),
    tags(
        (name = "System", description = "Gateway liveness"),
        (name = "Market", description = "Engine book summary"),
        (name = "Trading", description = "Order placement and cancellation"),
    )
)]
pub struct ApiDoc;
