//! Hotel selection context
//!
//! Owned by whoever drives the dashboard and handed to the operations that
//! need a tenant. Nothing here is global.

use super::error::{ClientError, ClientResult};
use crate::interfaces::http::modules::hotels::HotelDto;

#[derive(Debug, Clone, Default)]
pub struct HotelSession {
    selected: Option<HotelDto>,
    hotels: Vec<HotelDto>,
}

impl HotelSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&HotelDto> {
        self.selected.as_ref()
    }

    pub fn hotels(&self) -> &[HotelDto] {
        &self.hotels
    }

    /// The selected hotel's id, or [`ClientError::NoHotelSelected`].
    pub fn hotel_id(&self) -> ClientResult<&str> {
        self.selected
            .as_ref()
            .map(|h| h.id.as_str())
            .ok_or(ClientError::NoHotelSelected)
    }

    pub fn select(&mut self, hotel: HotelDto) {
        log::debug!("Selected hotel {} ({})", hotel.name, hotel.id);
        self.selected = Some(hotel);
    }

    /// Selects a known hotel by id. Returns `false` when it is not loaded.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        match self.hotels.iter().find(|h| h.id == id).cloned() {
            Some(hotel) => {
                self.select(hotel);
                true
            }
            None => false,
        }
    }

    /// Replaces the known hotels. A selection that is no longer present is
    /// dropped.
    pub fn set_hotels(&mut self, hotels: Vec<HotelDto>) {
        if let Some(selected) = &self.selected {
            if !hotels.iter().any(|h| h.id == selected.id) {
                self.selected = None;
            }
        }
        self.hotels = hotels;
    }

    pub fn add_hotel(&mut self, hotel: HotelDto) {
        self.hotels.push(hotel);
    }

    /// Forgets the selection and every loaded hotel.
    pub fn clear(&mut self) {
        self.selected = None;
        self.hotels.clear();
    }
}
