//! API Module
//!
//! HTTP handlers and routing that expose the response cache to the compute
//! service. Transport concerns stay here; cache semantics live in `cache`.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
