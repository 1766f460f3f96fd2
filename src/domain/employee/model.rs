//! Employee domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::DomainError;

/// Staff role within a hotel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Housekeeping,
    Maintenance,
    FrontDesk,
    RoomService,
    Concierge,
    Manager,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 6] = [
        Self::Housekeeping,
        Self::Maintenance,
        Self::FrontDesk,
        Self::RoomService,
        Self::Concierge,
        Self::Manager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housekeeping => "housekeeping",
            Self::Maintenance => "maintenance",
            Self::FrontDesk => "front_desk",
            Self::RoomService => "room_service",
            Self::Concierge => "concierge",
            Self::Manager => "manager",
        }
    }

    /// Human-readable name for dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housekeeping => "Housekeeping",
            Self::Maintenance => "Maintenance",
            Self::FrontDesk => "Front Desk",
            Self::RoomService => "Room Service",
            Self::Concierge => "Concierge",
            Self::Manager => "Manager",
        }
    }
}

impl FromStr for EmployeeRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::invalid("role", format!("Unknown employee role '{}'", s)))
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff member, scoped to exactly one hotel
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub hotel_id: String,
    pub name: String,
    pub role: EmployeeRole,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(hotel_id: impl Into<String>, name: impl Into<String>, role: EmployeeRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.into(),
            name: name.into(),
            role,
            email: None,
            phone: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this employee may take a request raised in `hotel_id`.
    ///
    /// Checks tenancy before activity so callers see the cross-tenant
    /// error even for inactive staff of another hotel.
    pub fn ensure_assignable_to(&self, hotel_id: &str) -> Result<(), DomainError> {
        if self.hotel_id != hotel_id {
            return Err(DomainError::HotelMismatch {
                employee_id: self.id.clone(),
                hotel_id: hotel_id.to_string(),
            });
        }
        if !self.is_active {
            return Err(DomainError::InactiveEmployee(self.id.clone()));
        }
        Ok(())
    }
}

/// Input for registering an employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub hotel_id: String,
    pub name: String,
    pub role: EmployeeRole,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Criteria for listing a hotel's employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub hotel_id: String,
    pub role: Option<EmployeeRole>,
    pub is_active: Option<bool>,
}

impl EmployeeFilter {
    pub fn for_hotel(hotel_id: impl Into<String>) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        employee.hotel_id == self.hotel_id
            && self.role.map_or(true, |role| employee.role == role)
            && self.is_active.map_or(true, |active| employee.is_active == active)
    }
}
