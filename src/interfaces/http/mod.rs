//! HTTP REST API interfaces
//!
//! - `common`: error body, query and JSON extractors shared by every module
//! - `modules`: one directory per resource (dto + handlers)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
