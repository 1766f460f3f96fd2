//! Guest request domain entity and its enumerations

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::DomainError;

/// Lifecycle state of a guest request
///
/// The intended flow is `pending → in_progress → done`; the API accepts any
/// of the three values on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Done,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [Self::Pending, Self::InProgress, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// The status a "move forward" action leads to; `None` once done.
    pub fn next(&self) -> Option<RequestStatus> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::invalid("status", "Invalid status"))
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of service the guest asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Cleaning,
    Slippers,
    LateCheckout,
    Towels,
    RoomService,
    Maintenance,
    Other,
}

impl RequestType {
    pub const ALL: [RequestType; 7] = [
        Self::Cleaning,
        Self::Slippers,
        Self::LateCheckout,
        Self::Towels,
        Self::RoomService,
        Self::Maintenance,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Slippers => "slippers",
            Self::LateCheckout => "late_checkout",
            Self::Towels => "towels",
            Self::RoomService => "room_service",
            Self::Maintenance => "maintenance",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cleaning => "Cleaning",
            Self::Slippers => "Slippers",
            Self::LateCheckout => "Late Checkout",
            Self::Towels => "Towels",
            Self::RoomService => "Room Service",
            Self::Maintenance => "Maintenance",
            Self::Other => "Other",
        }
    }
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::invalid("requestType", "Invalid request type"))
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::invalid("priority", "Priority must be one of low, medium, high"))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service request raised for a guest or room
#[derive(Debug, Clone, PartialEq)]
pub struct GuestRequest {
    pub id: String,
    /// Owning hotel; never changes after creation
    pub hotel_id: String,
    pub guest_name: String,
    pub room_number: Option<String>,
    pub request_type: RequestType,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub priority: Priority,
    pub assigned_to_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub estimated_completion: Option<DateTime<Utc>>,
}

impl GuestRequest {
    /// A fresh pending, unassigned request.
    pub fn new(input: NewGuestRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            hotel_id: input.hotel_id,
            guest_name: input.guest_name,
            room_number: input.room_number,
            request_type: input.request_type,
            description: input.description,
            status: RequestStatus::Pending,
            priority: input.priority.unwrap_or_default(),
            assigned_to_id: None,
            created_at: now,
            updated_at: now,
            estimated_completion: None,
        }
    }

    pub fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
        self.touch();
    }

    pub fn assign_to(&mut self, employee_id: impl Into<String>) {
        self.assigned_to_id = Some(employee_id.into());
        self.touch();
    }

    /// Apply a partial update. Assignment rules are checked by the caller.
    pub fn apply(&mut self, changes: RequestChanges) {
        let RequestChanges {
            guest_name,
            room_number,
            request_type,
            description,
            status,
            priority,
            assigned_to_id,
            estimated_completion,
        } = changes;

        if let Some(v) = guest_name {
            self.guest_name = v;
        }
        if let Some(v) = room_number {
            self.room_number = v;
        }
        if let Some(v) = request_type {
            self.request_type = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = priority {
            self.priority = v;
        }
        if let Some(v) = assigned_to_id {
            self.assigned_to_id = v;
        }
        if let Some(v) = estimated_completion {
            self.estimated_completion = v;
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input for creating a request
#[derive(Debug, Clone)]
pub struct NewGuestRequest {
    pub hotel_id: String,
    pub guest_name: String,
    pub room_number: Option<String>,
    pub request_type: RequestType,
    pub description: Option<String>,
    /// Defaults to [`Priority::Medium`]
    pub priority: Option<Priority>,
}

/// Partial update. Outer `None` leaves a field untouched; for nullable
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct RequestChanges {
    pub guest_name: Option<String>,
    pub room_number: Option<Option<String>>,
    pub request_type: Option<RequestType>,
    pub description: Option<Option<String>>,
    pub status: Option<RequestStatus>,
    pub priority: Option<Priority>,
    pub assigned_to_id: Option<Option<String>>,
    pub estimated_completion: Option<Option<DateTime<Utc>>>,
}

/// Request counts per status for one hotel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestStats {
    pub pending: u64,
    pub in_progress: u64,
    pub done: u64,
    pub total: u64,
}
