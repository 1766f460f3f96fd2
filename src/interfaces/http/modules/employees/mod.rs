//! Employee module: staff listing per hotel

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
