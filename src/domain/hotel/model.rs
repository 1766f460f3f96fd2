//! Hotel domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A tenant: owns employees and guest requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(name: impl Into<String>, address: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            address,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for registering a hotel.
#[derive(Debug, Clone)]
pub struct NewHotel {
    pub name: String,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_hotel_gets_uuid_and_matching_timestamps() {
        let hotel = Hotel::new("Grand Budapest", None);
        assert!(Uuid::parse_str(&hotel.id).is_ok());
        assert_eq!(hotel.created_at, hotel.updated_at);
        assert!(hotel.address.is_none());
    }
}
