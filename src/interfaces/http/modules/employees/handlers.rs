//! Employee handlers (read-only)

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{EmployeeDto, ListEmployeesParams};
use crate::application::EmployeeService;
use crate::domain::employee::{EmployeeFilter, EmployeeRole};
use crate::domain::DomainError;
use crate::interfaces::http::common::{non_empty, required_hotel_id, ApiError, ApiQuery, ErrorBody};

/// Employee handler state
#[derive(Clone)]
pub struct EmployeeHandlerState {
    pub service: Arc<EmployeeService>,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    params(ListEmployeesParams),
    responses(
        (status = 200, description = "Employees of the hotel, by name", body = Vec<EmployeeDto>),
        (status = 400, description = "Missing hotelId or unknown role", body = ErrorBody)
    )
)]
pub async fn list_employees(
    State(state): State<EmployeeHandlerState>,
    ApiQuery(params): ApiQuery<ListEmployeesParams>,
) -> Result<Json<Vec<EmployeeDto>>, ApiError> {
    const OP: &str = "Failed to fetch employees";

    let mut filter = EmployeeFilter::for_hotel(required_hotel_id(params.hotel_id)?);
    filter.role = non_empty(params.role)
        .map(|r| r.parse::<EmployeeRole>())
        .transpose()
        .map_err(ApiError::context(OP))?;
    filter.is_active = non_empty(params.is_active)
        .map(|v| parse_flag(&v))
        .transpose()
        .map_err(ApiError::context(OP))?;

    let employees = state
        .service
        .list(&filter)
        .await
        .map_err(ApiError::context(OP))?;
    Ok(Json(employees.into_iter().map(EmployeeDto::from).collect()))
}

fn parse_flag(value: &str) -> Result<bool, DomainError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DomainError::invalid("isActive", "isActive must be true or false")),
    }
}
