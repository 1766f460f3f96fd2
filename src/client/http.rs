//! HTTP client for the REST API

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{ClientError, ClientResult};
use crate::domain::employee::EmployeeRole;
use crate::domain::request::RequestStatus;
use crate::interfaces::http::modules::employees::EmployeeDto;
use crate::interfaces::http::modules::hotels::{CreateHotelRequest, HotelDto};
use crate::interfaces::http::modules::requests::{
    AssignRequestBody, CreateRequestBody, GuestRequestDto, ListRequestsParams,
    ListRequestsResponse, MessageResponse, RequestStatsDto, UpdateRequestBody, UpdateStatusBody,
};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `http://127.0.0.1:8080`. `/api` is appended per call.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Typed wrapper over every `/api` endpoint
#[derive(Debug, Clone)]
pub struct HotelDeskClient {
    client: Client,
    base_url: String,
}

impl HotelDeskClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            log::debug!("API call failed with {}: {}", status, text);
            return Err(ClientError::from_status(status, &text));
        }

        response.json().await.map_err(Into::into)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.client.get(self.url(path))).await
    }

    async fn get_with<T: DeserializeOwned, Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ClientResult<T> {
        Self::send(self.client.get(self.url(path)).query(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        Self::send(self.client.post(self.url(path)).json(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        Self::send(self.client.patch(self.url(path)).json(body)).await
    }

    // ========== Hotels ==========

    pub async fn list_hotels(&self) -> ClientResult<Vec<HotelDto>> {
        self.get("hotels").await
    }

    pub async fn create_hotel(&self, name: &str, address: Option<&str>) -> ClientResult<HotelDto> {
        let body = CreateHotelRequest {
            name: name.to_string(),
            address: address.map(String::from),
        };
        self.post("hotels", &body).await
    }

    // ========== Employees ==========

    pub async fn list_employees(
        &self,
        hotel_id: &str,
        role: Option<EmployeeRole>,
        is_active: Option<bool>,
    ) -> ClientResult<Vec<EmployeeDto>> {
        let mut query = vec![("hotelId", hotel_id.to_string())];
        if let Some(role) = role {
            query.push(("role", role.as_str().to_string()));
        }
        if let Some(active) = is_active {
            query.push(("isActive", active.to_string()));
        }
        self.get_with("employees", &query).await
    }

    // ========== Requests ==========

    pub async fn list_requests(&self, params: &ListRequestsParams) -> ClientResult<ListRequestsResponse> {
        self.get_with("requests", params).await
    }

    pub async fn get_request(&self, id: &str) -> ClientResult<GuestRequestDto> {
        self.get(&format!("requests/{id}")).await
    }

    pub async fn create_request(&self, body: &CreateRequestBody) -> ClientResult<GuestRequestDto> {
        self.post("requests", body).await
    }

    pub async fn update_request(&self, id: &str, body: &UpdateRequestBody) -> ClientResult<GuestRequestDto> {
        self.patch(&format!("requests/{id}"), body).await
    }

    pub async fn delete_request(&self, id: &str) -> ClientResult<MessageResponse> {
        Self::send(self.client.delete(self.url(&format!("requests/{id}")))).await
    }

    pub async fn update_request_status(&self, id: &str, status: RequestStatus) -> ClientResult<GuestRequestDto> {
        let body = UpdateStatusBody {
            status: Some(status.as_str().to_string()),
        };
        self.patch(&format!("requests/{id}/status"), &body).await
    }

    pub async fn assign_request(&self, id: &str, employee_id: &str) -> ClientResult<GuestRequestDto> {
        let body = AssignRequestBody {
            assigned_to_id: Some(employee_id.to_string()),
        };
        self.patch(&format!("requests/{id}/assign"), &body).await
    }

    pub async fn request_stats(&self, hotel_id: &str) -> ClientResult<RequestStatsDto> {
        self.get_with("requests/stats", &[("hotelId", hotel_id)]).await
    }

    pub async fn requests_by_room(&self, hotel_id: &str, room_number: &str) -> ClientResult<Vec<GuestRequestDto>> {
        let path = format!("requests/room/{}", encode_segment(room_number));
        self.get_with(&path, &[("hotelId", hotel_id)]).await
    }
}

/// Percent-encodes a single path segment (RFC 3986 unreserved set kept).
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
