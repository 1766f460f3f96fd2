//! Typed client for the REST API
//!
//! - `http`: one async method per endpoint
//! - `cache`: keyed responses with two-phase optimistic status updates
//! - `session`: the selected hotel, owned by the caller
//! - `desk`: the three combined the way a dashboard uses them
//! - `presentation`: tones and relative-time labels

pub mod cache;
pub mod desk;
pub mod error;
pub mod http;
pub mod presentation;
pub mod session;

pub use cache::{RequestCache, StatusSnapshot};
pub use desk::RequestDesk;
pub use error::{ClientError, ClientResult};
pub use http::{ClientConfig, HotelDeskClient, DEFAULT_TIMEOUT};
pub use presentation::{elapsed_label, is_overdue, is_urgent, Tone};
pub use session::HotelSession;
