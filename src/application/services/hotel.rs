//! Hotel (tenant) service

use std::sync::Arc;

use log::info;

use crate::domain::hotel::{Hotel, NewHotel};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct HotelService {
    repos: Arc<dyn RepositoryProvider>,
}

impl HotelService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Hotel>> {
        self.repos.hotels().find_all().await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Hotel> {
        self.repos
            .hotels()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", id))
    }

    pub async fn create(&self, input: NewHotel) -> DomainResult<Hotel> {
        if input.name.is_empty() {
            return Err(DomainError::invalid("name", "Hotel name is required"));
        }

        let hotel = Hotel::new(input.name, input.address);
        self.repos.hotels().save(hotel.clone()).await?;
        info!("Hotel created: {} ({})", hotel.name, hotel.id);
        Ok(hotel)
    }
}
