//! Display helpers for dashboards
//!
//! Labels live on the enums themselves (`RequestStatus::label` and friends);
//! this module adds color tones and relative-time text.

use chrono::{DateTime, Utc};

use crate::domain::employee::EmployeeRole;
use crate::domain::request::{Priority, RequestStatus};

/// Badge color family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl RequestStatus {
    pub fn tone(&self) -> Tone {
        match self {
            Self::Pending => Tone::Warning,
            Self::InProgress => Tone::Info,
            Self::Done => Tone::Success,
        }
    }
}

impl Priority {
    pub fn tone(&self) -> Tone {
        match self {
            Self::Low => Tone::Neutral,
            Self::Medium => Tone::Warning,
            Self::High => Tone::Danger,
        }
    }
}

impl EmployeeRole {
    pub fn tone(&self) -> Tone {
        match self {
            Self::Manager => Tone::Danger,
            Self::FrontDesk | Self::Concierge => Tone::Info,
            Self::Housekeeping | Self::RoomService => Tone::Success,
            Self::Maintenance => Tone::Warning,
        }
    }
}

/// "12m ago", "3h ago", "2d ago". Future timestamps read as "0m ago".
pub fn elapsed_label(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - since).num_minutes().max(0);
    let hours = minutes / 60;
    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}

/// High priority open for over 30 minutes, or anything open for over 2 hours.
pub fn is_urgent(created_at: DateTime<Utc>, priority: Priority, now: DateTime<Utc>) -> bool {
    let minutes = (now - created_at).num_minutes();
    (priority == Priority::High && minutes > 30) || minutes > 120
}

/// Open for more than 4 hours.
pub fn is_overdue(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - created_at).num_minutes() > 240
}
