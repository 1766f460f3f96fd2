//! Filtering, sorting and pagination of guest requests
//!
//! A [`RequestQuery`] is the storage-independent description of a list call.
//! The SQL repository translates it into a `SELECT`; the in-memory one
//! evaluates [`RequestFilter::matches`] and [`RequestSort::compare`] directly.
//! Both must agree: enum columns order by declaration order, a missing room
//! number sorts before any value in ascending order, and ties break on id.

use std::cmp::Ordering;

use super::model::{GuestRequest, Priority, RequestStatus, RequestType};
use crate::domain::employee::Employee;
use crate::support::pagination::PageRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub request_type: Option<RequestType>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring of the room number
    pub room_number: Option<String>,
    pub assigned_to_id: Option<String>,
}

impl RequestFilter {
    pub fn matches(&self, request: &GuestRequest) -> bool {
        if self.status.is_some_and(|s| s != request.status) {
            return false;
        }
        if self.request_type.is_some_and(|t| t != request.request_type) {
            return false;
        }
        if self.priority.is_some_and(|p| p != request.priority) {
            return false;
        }
        if let Some(needle) = &self.room_number {
            let needle = needle.to_lowercase();
            match &request.room_number {
                Some(room) if room.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }
        if let Some(assignee) = &self.assigned_to_id {
            if request.assigned_to_id.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    Priority,
    Status,
    RoomNumber,
    GuestName,
    RequestType,
}

impl SortField {
    /// Unknown names fall back to `createdAt`.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "priority" => Self::Priority,
            "status" => Self::Status,
            "roomNumber" => Self::RoomNumber,
            "guestName" => Self::GuestName,
            "requestType" => Self::RequestType,
            _ => Self::CreatedAt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::RoomNumber => "roomNumber",
            Self::GuestName => "guestName",
            Self::RequestType => "requestType",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `asc` is descending.
    pub fn parse_lenient(s: &str) -> Self {
        if s == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Sort field and direction; defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl RequestSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn compare(&self, a: &GuestRequest, b: &GuestRequest) -> Ordering {
        let by_field = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortField::Status => a.status.rank().cmp(&b.status.rank()),
            SortField::RoomNumber => a.room_number.cmp(&b.room_number),
            SortField::GuestName => a.guest_name.cmp(&b.guest_name),
            SortField::RequestType => a.request_type.rank().cmp(&b.request_type.rank()),
        };
        let by_field = match self.order {
            SortOrder::Asc => by_field,
            SortOrder::Desc => by_field.reverse(),
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }
}

impl RequestStatus {
    pub fn rank(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or_default()
    }
}

impl Priority {
    pub fn rank(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or_default()
    }
}

impl RequestType {
    pub fn rank(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or_default()
    }
}

/// A complete list request for one hotel.
#[derive(Debug, Clone)]
pub struct RequestQuery {
    pub hotel_id: String,
    pub filter: RequestFilter,
    pub sort: RequestSort,
    pub page: PageRequest,
}

impl RequestQuery {
    pub fn for_hotel(hotel_id: impl Into<String>) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            filter: RequestFilter::default(),
            sort: RequestSort::default(),
            page: PageRequest::default(),
        }
    }

    pub fn matches(&self, request: &GuestRequest) -> bool {
        request.hotel_id == self.hotel_id && self.filter.matches(request)
    }
}

/// A request joined with its assignee, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedRequest {
    pub request: GuestRequest,
    pub assigned_to: Option<Employee>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::request::NewGuestRequest;

    fn request(id: &str, room: Option<&str>, priority: Priority) -> GuestRequest {
        let mut r = GuestRequest::new(NewGuestRequest {
            hotel_id: "h1".into(),
            guest_name: format!("guest-{id}"),
            room_number: room.map(String::from),
            request_type: RequestType::Cleaning,
            description: None,
            priority: Some(priority),
        });
        r.id = id.to_string();
        r
    }

    #[test]
    fn room_filter_is_case_insensitive_substring() {
        let filter = RequestFilter {
            room_number: Some("a1".into()),
            ..Default::default()
        };
        assert!(filter.matches(&request("1", Some("SUITE-A12"), Priority::Low)));
        assert!(!filter.matches(&request("2", Some("B12"), Priority::Low)));
        assert!(!filter.matches(&request("3", None, Priority::Low)));
    }

    #[test]
    fn filters_combine_with_and() {
        let mut r = request("1", Some("101"), Priority::High);
        r.assigned_to_id = Some("e1".into());
        let filter = RequestFilter {
            priority: Some(Priority::High),
            assigned_to_id: Some("e1".into()),
            status: Some(RequestStatus::Pending),
            ..Default::default()
        };
        assert!(filter.matches(&r));

        r.status = RequestStatus::Done;
        assert!(!filter.matches(&r));
    }

    #[test]
    fn query_scopes_to_hotel() {
        let q = RequestQuery::for_hotel("h2");
        assert!(!q.matches(&request("1", None, Priority::Low)));
    }

    #[test]
    fn priority_sorts_by_severity_not_alphabet() {
        let mut items = vec![
            request("a", None, Priority::Medium),
            request("b", None, Priority::High),
            request("c", None, Priority::Low),
        ];
        let sort = RequestSort::new(SortField::Priority, SortOrder::Asc);
        items.sort_by(|x, y| sort.compare(x, y));
        let ids: Vec<_> = items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn default_sort_is_newest_first() {
        let mut old = request("old", None, Priority::Low);
        old.created_at = Utc::now() - Duration::hours(2);
        let new = request("new", None, Priority::Low);

        let mut items = vec![old, new];
        items.sort_by(|x, y| RequestSort::default().compare(x, y));
        assert_eq!(items[0].id, "new");
    }

    #[test]
    fn missing_room_sorts_first_ascending_and_last_descending() {
        let mut items = vec![
            request("x", Some("202"), Priority::Low),
            request("y", None, Priority::Low),
            request("z", Some("101"), Priority::Low),
        ];
        let asc = RequestSort::new(SortField::RoomNumber, SortOrder::Asc);
        items.sort_by(|a, b| asc.compare(a, b));
        assert_eq!(items.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["y", "z", "x"]);

        let desc = RequestSort::new(SortField::RoomNumber, SortOrder::Desc);
        items.sort_by(|a, b| desc.compare(a, b));
        assert_eq!(items.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["x", "z", "y"]);
    }

    #[test]
    fn lenient_parsing_falls_back_to_defaults() {
        assert_eq!(SortField::parse_lenient("guestName"), SortField::GuestName);
        assert_eq!(SortField::parse_lenient("bogus"), SortField::CreatedAt);
        assert_eq!(SortOrder::parse_lenient("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse_lenient("ASC"), SortOrder::Desc);
    }
}
