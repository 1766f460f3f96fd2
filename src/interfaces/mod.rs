//! Inbound adapters
//!
//! Only the REST API lives here; the typed consumer side is in `crate::client`.

pub mod http;

pub use http::{create_api_router, ApiDoc};
