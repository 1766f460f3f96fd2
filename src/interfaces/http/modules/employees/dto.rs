//! Employee DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::employee::{Employee, EmployeeRole};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
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

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            hotel_id: e.hotel_id,
            name: e.name,
            role: e.role,
            email: e.email,
            phone: e.phone,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListEmployeesParams {
    /// Required
    pub hotel_id: Option<String>,
    /// One of housekeeping, maintenance, front_desk, room_service, concierge, manager
    pub role: Option<String>,
    /// `true` or `false`
    pub is_active: Option<String>,
}
