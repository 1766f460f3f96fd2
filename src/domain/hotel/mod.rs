//! Hotel aggregate (the tenant)

pub mod model;
pub mod repository;

pub use model::{Hotel, NewHotel};
pub use repository::HotelRepository;
