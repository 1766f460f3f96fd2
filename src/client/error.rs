//! Client error types

use thiserror::Error;

use crate::interfaces::http::common::{ErrorBody, FieldError};

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 400 from the server, with per-field details when validation failed
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        details: Vec<FieldError>,
    },

    /// 404 from the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// An operation that needs a hotel ran before one was selected
    #[error("No hotel selected")]
    NoHotelSelected,
}

impl ClientError {
    /// Builds the error for a non-success response. `body` is the raw text,
    /// which is usually an [`ErrorBody`] but may be anything a proxy returns.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .map(|b| b.error.clone())
            .unwrap_or_else(|| body.to_string());

        match status {
            reqwest::StatusCode::BAD_REQUEST => ClientError::BadRequest {
                message,
                details: parsed.and_then(|b| b.details).unwrap_or_default(),
            },
            reqwest::StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
