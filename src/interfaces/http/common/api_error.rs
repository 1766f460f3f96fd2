//! JSON error responses
//!
//! Every failing endpoint answers with `{ "error": "...", "details": [...] }`.
//! Domain errors map onto 400/404; storage failures are logged and hidden
//! behind the per-operation message supplied by the handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::camel_case;
use crate::domain::DomainError;

/// One failed field of a request body or query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    /// 400 "Validation failed" with per-field details
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: "Validation failed".to_string(),
                details: Some(details),
            },
        }
    }

    pub fn missing_hotel_id() -> Self {
        Self::bad_request("Hotel ID is required")
    }

    /// Translate a domain error. `operation` is the public message used when
    /// the failure is internal, e.g. "Failed to fetch requests".
    pub fn from_domain(err: DomainError, operation: &str) -> Self {
        match err {
            DomainError::NotFound { entity, .. } => Self::not_found(format!("{} not found", entity)),
            DomainError::Validation(message) => Self::bad_request(message),
            DomainError::InvalidField { field, message } => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    error: message.clone(),
                    details: Some(vec![FieldError {
                        field: camel_case(field),
                        message,
                    }]),
                },
            },
            DomainError::HotelMismatch { .. } => {
                Self::bad_request("Employee does not belong to the same hotel")
            }
            DomainError::InactiveEmployee(_) => Self::bad_request("Employee is not active"),
            DomainError::Storage(detail) => {
                tracing::error!(error = %detail, "{}", operation);
                Self::internal(operation)
            }
        }
    }

    /// Closure form of [`ApiError::from_domain`] for `map_err`.
    pub fn context(operation: &'static str) -> impl Fn(DomainError) -> ApiError {
        move |err| Self::from_domain(err, operation)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = camel_case(&field);
                errs.iter().map(move |e| FieldError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        Self::validation(details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
