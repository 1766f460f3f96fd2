//! # Hotel Desk
//!
//! Multi-tenant guest-request service for hotels: staff track guest
//! requests (cleaning, towels, room service, ...) from creation through
//! assignment to completion.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, the request status lifecycle, list queries
//!   and repository traits
//! - **application**: Services holding the business rules
//! - **infrastructure**: SeaORM persistence and an in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **client**: Typed HTTP client with a response cache and hotel session
//! - **server**: Startup, shutdown and tracing setup shared by the binary
//!   and the tests

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, run_migrations, DatabaseConfig, InMemoryRepositoryProvider,
    SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::create_api_router;
