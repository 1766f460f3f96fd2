//! Shared HTTP building blocks: error body, extractors, serde helpers

pub mod api_error;
pub mod query;
pub mod validated_json;

pub use api_error::{ApiError, ErrorBody, FieldError};
pub use query::ApiQuery;
pub use validated_json::ValidatedJson;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Empty query values count as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn required_hotel_id(hotel_id: Option<String>) -> Result<String, ApiError> {
    non_empty(hotel_id).ok_or_else(ApiError::missing_hotel_id)
}

/// `assigned_to_id` → `assignedToId`, matching the JSON field names.
pub(crate) fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
