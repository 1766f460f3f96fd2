//! Guest request module: list, lifecycle, assignment and stats

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
