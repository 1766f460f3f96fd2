//! Cache-aware request operations for a dashboard
//!
//! [`RequestDesk`] owns the HTTP client, the response cache and the hotel
//! session. Reads are served from the cache when possible; mutations go to
//! the server first and then refresh or invalidate the affected entries.
//! Status changes are the one exception: they show up locally before the
//! server answers and are rolled back if it refuses.

use super::cache::{RequestCache, StatusSnapshot};
use super::error::ClientResult;
use super::http::HotelDeskClient;
use super::session::HotelSession;
use crate::domain::employee::EmployeeRole;
use crate::domain::request::RequestStatus;
use crate::interfaces::http::modules::employees::EmployeeDto;
use crate::interfaces::http::modules::hotels::HotelDto;
use crate::interfaces::http::modules::requests::{
    CreateRequestBody, GuestRequestDto, ListRequestsParams, ListRequestsResponse,
    RequestStatsDto, UpdateRequestBody,
};

pub struct RequestDesk {
    client: HotelDeskClient,
    cache: RequestCache,
    session: HotelSession,
}

impl RequestDesk {
    pub fn new(client: HotelDeskClient) -> Self {
        Self {
            client,
            cache: RequestCache::new(),
            session: HotelSession::new(),
        }
    }

    pub fn client(&self) -> &HotelDeskClient {
        &self.client
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    pub fn session(&self) -> &HotelSession {
        &self.session
    }

    // ── Hotels and session ──────────────────────────────────────

    pub async fn load_hotels(&mut self) -> ClientResult<&[HotelDto]> {
        let hotels = self.client.list_hotels().await?;
        self.session.set_hotels(hotels);
        Ok(self.session.hotels())
    }

    pub async fn create_hotel(&mut self, name: &str, address: Option<&str>) -> ClientResult<HotelDto> {
        let hotel = self.client.create_hotel(name, address).await?;
        self.session.add_hotel(hotel.clone());
        Ok(hotel)
    }

    /// Switches tenant. Cached data belongs to the previous hotel, so it goes.
    pub fn select_hotel(&mut self, hotel: HotelDto) {
        self.cache.clear();
        self.session.select(hotel);
    }

    /// Drops the selection, the hotel list and every cached response.
    pub fn sign_out(&mut self) {
        self.cache.clear();
        self.session.clear();
    }

    pub async fn employees(
        &self,
        role: Option<EmployeeRole>,
        is_active: Option<bool>,
    ) -> ClientResult<Vec<EmployeeDto>> {
        let hotel_id = self.session.hotel_id()?;
        self.client.list_employees(hotel_id, role, is_active).await
    }

    // ── Reads ───────────────────────────────────────────────────

    /// One list page for the selected hotel. `params.hotel_id` is overwritten.
    pub async fn requests(&mut self, mut params: ListRequestsParams) -> ClientResult<ListRequestsResponse> {
        params.hotel_id = Some(self.session.hotel_id()?.to_string());
        if let Some(page) = self.cache.list(&params) {
            return Ok(page.clone());
        }
        let page = self.client.list_requests(&params).await?;
        self.cache.put_list(&params, page.clone());
        Ok(page)
    }

    pub async fn request(&mut self, id: &str) -> ClientResult<GuestRequestDto> {
        if let Some(cached) = self.cache.detail(id) {
            return Ok(cached.clone());
        }
        let request = self.client.get_request(id).await?;
        self.cache.put_detail(request.clone());
        Ok(request)
    }

    pub async fn stats(&mut self) -> ClientResult<RequestStatsDto> {
        let hotel_id = self.session.hotel_id()?.to_string();
        if let Some(stats) = self.cache.stats(&hotel_id) {
            return Ok(*stats);
        }
        let stats = self.client.request_stats(&hotel_id).await?;
        self.cache.put_stats(&hotel_id, stats);
        Ok(stats)
    }

    pub async fn room_history(&mut self, room_number: &str) -> ClientResult<Vec<GuestRequestDto>> {
        let hotel_id = self.session.hotel_id()?.to_string();
        if let Some(cached) = self.cache.room(&hotel_id, room_number) {
            return Ok(cached.clone());
        }
        let requests = self.client.requests_by_room(&hotel_id, room_number).await?;
        self.cache.put_room(&hotel_id, room_number, requests.clone());
        Ok(requests)
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Files a request for the selected hotel. `body.hotel_id` is overwritten.
    pub async fn create_request(&mut self, mut body: CreateRequestBody) -> ClientResult<GuestRequestDto> {
        body.hotel_id = self.session.hotel_id()?.to_string();
        let created = self.client.create_request(&body).await?;
        self.cache.invalidate_lists();
        self.cache.invalidate_stats();
        Ok(created)
    }

    pub async fn update_request(&mut self, id: &str, body: &UpdateRequestBody) -> ClientResult<GuestRequestDto> {
        let updated = self.client.update_request(id, body).await?;
        self.cache.put_detail(updated.clone());
        self.cache.invalidate_lists();
        self.cache.invalidate_stats();
        Ok(updated)
    }

    /// Optimistic: the cached request shows `status` before the call returns
    /// and reverts to its prior state if the call fails.
    pub async fn update_status(&mut self, id: &str, status: RequestStatus) -> ClientResult<GuestRequestDto> {
        let snapshot = self.begin_status(id, status);
        self.finish_status(snapshot).await
    }

    /// First half of [`update_status`](Self::update_status). Until the
    /// snapshot is passed to [`finish_status`](Self::finish_status),
    /// [`cache`](Self::cache) serves the speculative status.
    pub fn begin_status(&mut self, id: &str, status: RequestStatus) -> StatusSnapshot {
        self.cache.apply_optimistic_status(id, status)
    }

    /// Sends the status change and commits or rolls back the cache.
    pub async fn finish_status(&mut self, snapshot: StatusSnapshot) -> ClientResult<GuestRequestDto> {
        let id = snapshot.request_id().to_string();
        match self.client.update_request_status(&id, snapshot.status()).await {
            Ok(confirmed) => {
                self.cache.commit_status(snapshot, confirmed.clone());
                Ok(confirmed)
            }
            Err(e) => {
                log::debug!("Status change for {} failed, rolling back: {}", id, e);
                self.cache.roll_back(snapshot);
                Err(e)
            }
        }
    }

    pub async fn assign(&mut self, id: &str, employee_id: &str) -> ClientResult<GuestRequestDto> {
        let assigned = self.client.assign_request(id, employee_id).await?;
        self.cache.refresh_detail(assigned.clone());
        self.cache.invalidate_lists();
        Ok(assigned)
    }

    pub async fn delete_request(&mut self, id: &str) -> ClientResult<()> {
        self.client.delete_request(id).await?;
        self.cache.remove_detail(id);
        self.cache.invalidate_lists();
        self.cache.invalidate_stats();
        Ok(())
    }

    /// Advances a request one step along pending → in_progress → done.
    /// Returns `Ok(None)` for requests that are already done.
    pub async fn advance(&mut self, id: &str) -> ClientResult<Option<GuestRequestDto>> {
        let current = self.request(id).await?;
        match current.status.next() {
            Some(next) => self.update_status(id, next).await.map(Some),
            None => Ok(None),
        }
    }
}
