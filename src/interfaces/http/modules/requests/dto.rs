//! Guest request DTOs
//!
//! Shared by the handlers and by the HTTP client, so every type here
//! serializes and deserializes to the same camelCase wire format.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::super::employees::EmployeeDto;
use super::super::hotels::HotelSummaryDto;
use crate::application::RequestDetail;
use crate::domain::request::{
    AssignedRequest, GuestRequest, NewGuestRequest, Priority, RequestChanges, RequestStats,
    RequestStatus, RequestType,
};
use crate::domain::DomainError;
use crate::interfaces::http::common::double_option;

// ── Responses ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestRequestDto {
    pub id: String,
    pub hotel_id: String,
    pub guest_name: String,
    pub room_number: Option<String>,
    pub request_type: RequestType,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub priority: Priority,
    pub assigned_to_id: Option<String>,
    /// Assignee, `null` when unassigned
    pub assigned_to: Option<EmployeeDto>,
    /// Present on detail and update responses only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelSummaryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub estimated_completion: Option<DateTime<Utc>>,
}

impl GuestRequestDto {
    fn build(r: GuestRequest, assigned_to: Option<EmployeeDto>, hotel: Option<HotelSummaryDto>) -> Self {
        Self {
            id: r.id,
            hotel_id: r.hotel_id,
            guest_name: r.guest_name,
            room_number: r.room_number,
            request_type: r.request_type,
            description: r.description,
            status: r.status,
            priority: r.priority,
            assigned_to_id: r.assigned_to_id,
            assigned_to,
            hotel,
            created_at: r.created_at,
            updated_at: r.updated_at,
            estimated_completion: r.estimated_completion,
        }
    }
}

impl From<AssignedRequest> for GuestRequestDto {
    fn from(a: AssignedRequest) -> Self {
        Self::build(a.request, a.assigned_to.map(EmployeeDto::from), None)
    }
}

impl From<RequestDetail> for GuestRequestDto {
    fn from(d: RequestDetail) -> Self {
        Self::build(
            d.request,
            d.assigned_to.map(EmployeeDto::from),
            Some(HotelSummaryDto::from(d.hotel)),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRequestsResponse {
    pub requests: Vec<GuestRequestDto>,
    /// Matching rows before pagination
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatsDto {
    pub pending: u64,
    pub in_progress: u64,
    pub done: u64,
    pub total: u64,
}

impl From<RequestStats> for RequestStatsDto {
    fn from(s: RequestStats) -> Self {
        Self {
            pending: s.pending,
            in_progress: s.in_progress,
            done: s.done,
            total: s.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ── Query parameters ────────────────────────────────────────────

/// Also serialized by the client as its query string, so unset values are
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRequestsParams {
    /// Required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Case-insensitive substring match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<String>,
    /// createdAt (default), priority, status, roomNumber, guestName, requestType
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// asc or desc (default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    /// 1-based, default 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// 1..=100, default 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HotelScopeParams {
    /// Required
    pub hotel_id: Option<String>,
}

// ── Request bodies ──────────────────────────────────────────────

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| with_message("uuid", "Hotel ID must be a valid UUID"))
}

fn validate_request_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<RequestType>()
        .map(|_| ())
        .map_err(|_| with_message("request_type", "Invalid request type"))
}

fn validate_priority(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Priority>()
        .map(|_| ())
        .map_err(|_| with_message("priority", "Priority must be one of low, medium, high"))
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<RequestStatus>()
        .map(|_| ())
        .map_err(|_| with_message("status", "Invalid status"))
}

/// Enum fields travel as strings so that a bad value becomes a field
/// error instead of a JSON syntax error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[validate(custom(function = "validate_uuid"))]
    pub hotel_id: String,
    #[validate(length(min = 1, message = "Guest name is required"))]
    pub guest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[validate(custom(function = "validate_request_type"))]
    #[schema(example = "cleaning")]
    pub request_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_priority"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "medium")]
    pub priority: Option<String>,
}

impl CreateRequestBody {
    pub fn into_new_request(self) -> Result<NewGuestRequest, DomainError> {
        Ok(NewGuestRequest {
            request_type: self.request_type.parse::<RequestType>()?,
            priority: self.priority.as_deref().map(str::parse::<Priority>).transpose()?,
            hotel_id: self.hotel_id,
            guest_name: self.guest_name,
            room_number: self.room_number,
            description: self.description,
        })
    }
}

/// Partial update. Omitted fields stay as they are; `null` clears the
/// nullable ones. `hotelId` and unknown fields are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateRequestBody {
    #[validate(length(min = 1, message = "Guest name is required"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub room_number: Option<Option<String>>,

    #[validate(custom(function = "validate_request_type"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[validate(custom(function = "validate_status"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[validate(custom(function = "validate_priority"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub assigned_to_id: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub estimated_completion: Option<Option<DateTime<Utc>>>,
}

impl UpdateRequestBody {
    pub fn into_changes(self) -> Result<RequestChanges, DomainError> {
        if let Some(Some(id)) = &self.assigned_to_id {
            if id.is_empty() {
                return Err(DomainError::invalid("assignedToId", "Employee ID is required"));
            }
        }
        Ok(RequestChanges {
            guest_name: self.guest_name,
            room_number: self.room_number,
            request_type: self.request_type.as_deref().map(str::parse::<RequestType>).transpose()?,
            description: self.description,
            status: self.status.as_deref().map(str::parse::<RequestStatus>).transpose()?,
            priority: self.priority.as_deref().map(str::parse::<Priority>).transpose()?,
            assigned_to_id: self.assigned_to_id,
            estimated_completion: self.estimated_completion,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusBody {
    #[validate(required(message = "Status is required"))]
    #[schema(example = "in_progress")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequestBody {
    #[validate(
        required(message = "Employee ID is required"),
        length(min = 1, message = "Employee ID is required")
    )]
    pub assigned_to_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_reports_every_bad_field() {
        let body: CreateRequestBody = serde_json::from_value(serde_json::json!({
            "hotelId": "not-a-uuid",
            "guestName": "",
            "requestType": "spa",
            "priority": "urgent"
        }))
        .unwrap();

        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn create_body_converts_with_default_priority() {
        let body: CreateRequestBody = serde_json::from_value(serde_json::json!({
            "hotelId": Uuid::new_v4().to_string(),
            "guestName": "Ms. Bates",
            "requestType": "late_checkout"
        }))
        .unwrap();
        assert!(body.validate().is_ok());

        let new = body.into_new_request().unwrap();
        assert_eq!(new.request_type, RequestType::LateCheckout);
        assert_eq!(new.priority, None);
    }

    #[test]
    fn update_body_rejects_hotel_id() {
        let result: Result<UpdateRequestBody, _> =
            serde_json::from_value(serde_json::json!({ "hotelId": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn update_body_maps_null_to_clear() {
        let body: UpdateRequestBody = serde_json::from_value(serde_json::json!({
            "roomNumber": null,
            "status": "done"
        }))
        .unwrap();
        let changes = body.into_changes().unwrap();
        assert_eq!(changes.room_number, Some(None));
        assert_eq!(changes.status, Some(RequestStatus::Done));
        assert_eq!(changes.description, None);
    }

    #[test]
    fn update_body_serializes_only_set_fields() {
        let body = UpdateRequestBody {
            description: Some(None),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "description": null })
        );
    }

    #[test]
    fn response_always_carries_assigned_to() {
        let request = GuestRequest::new(NewGuestRequest {
            hotel_id: "h".into(),
            guest_name: "g".into(),
            room_number: None,
            request_type: RequestType::Other,
            description: None,
            priority: None,
        });
        let json = serde_json::to_value(GuestRequestDto::from(AssignedRequest {
            request,
            assigned_to: None,
        }))
        .unwrap();
        assert!(json["assignedTo"].is_null());
        assert!(json.get("hotel").is_none());
        assert_eq!(json["requestType"], "other");
    }
}
