//! Disaster relief coordination backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Generated OpenAPI description of every route.
pub use doc::ApiDoc;
/// Request tracing middleware attached by the server bootstrap.
pub use middleware::trace::Trace;
