//! Keyed response cache with optimistic status updates
//!
//! Entries are grouped the way a dashboard reads them: request lists keyed
//! by their full query, single requests by id, stats by hotel and room
//! histories by hotel + room. Mutations invalidate the groups they affect.
//!
//! Status changes are applied in two phases. [`RequestCache::apply_optimistic_status`]
//! patches the cached request at once and hands back a [`StatusSnapshot`];
//! the caller then either [`commit`](RequestCache::commit_status)s it with
//! the server's answer or [`roll_back`](RequestCache::roll_back)s to the
//! prior state.

use std::collections::HashMap;

use chrono::Utc;

use crate::domain::request::RequestStatus;
use crate::interfaces::http::modules::requests::{
    GuestRequestDto, ListRequestsParams, ListRequestsResponse, RequestStatsDto,
};

/// Identity of a cached list page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey(String);

impl From<&ListRequestsParams> for ListKey {
    fn from(params: &ListRequestsParams) -> Self {
        // The serialized form skips unset values, so equal queries share a key.
        ListKey(serde_json::to_string(params).unwrap_or_default())
    }
}

/// Prior state of one request, taken before an optimistic change.
///
/// Not `Clone`: a snapshot is settled exactly once.
#[derive(Debug)]
#[must_use = "an optimistic update must be committed or rolled back"]
pub struct StatusSnapshot {
    id: String,
    status: RequestStatus,
    previous: Option<GuestRequestDto>,
}

impl StatusSnapshot {
    pub fn request_id(&self) -> &str {
        &self.id
    }

    /// The status applied optimistically.
    pub fn status(&self) -> RequestStatus {
        self.status
    }
}

#[derive(Debug, Default)]
pub struct RequestCache {
    lists: HashMap<ListKey, ListRequestsResponse>,
    details: HashMap<String, GuestRequestDto>,
    stats: HashMap<String, RequestStatsDto>,
    rooms: HashMap<(String, String), Vec<GuestRequestDto>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ───────────────────────────────────────────────────

    pub fn list(&self, params: &ListRequestsParams) -> Option<&ListRequestsResponse> {
        self.lists.get(&ListKey::from(params))
    }

    pub fn detail(&self, id: &str) -> Option<&GuestRequestDto> {
        self.details.get(id)
    }

    pub fn stats(&self, hotel_id: &str) -> Option<&RequestStatsDto> {
        self.stats.get(hotel_id)
    }

    pub fn room(&self, hotel_id: &str, room_number: &str) -> Option<&Vec<GuestRequestDto>> {
        self.rooms.get(&(hotel_id.to_string(), room_number.to_string()))
    }

    // ── Writes ──────────────────────────────────────────────────

    pub fn put_list(&mut self, params: &ListRequestsParams, page: ListRequestsResponse) {
        self.lists.insert(ListKey::from(params), page);
    }

    pub fn put_detail(&mut self, request: GuestRequestDto) {
        self.details.insert(request.id.clone(), request);
    }

    pub fn put_stats(&mut self, hotel_id: &str, stats: RequestStatsDto) {
        self.stats.insert(hotel_id.to_string(), stats);
    }

    pub fn put_room(&mut self, hotel_id: &str, room_number: &str, requests: Vec<GuestRequestDto>) {
        self.rooms
            .insert((hotel_id.to_string(), room_number.to_string()), requests);
    }

    /// Stores a mutation response. Status and assignment responses carry no
    /// hotel summary, so a cached one is kept.
    pub fn refresh_detail(&mut self, fresh: GuestRequestDto) {
        let hotel = match &fresh.hotel {
            Some(_) => None,
            None => self.details.get(&fresh.id).and_then(|cached| cached.hotel.clone()),
        };
        let merged = match hotel {
            Some(hotel) => GuestRequestDto {
                hotel: Some(hotel),
                ..fresh
            },
            None => fresh,
        };
        self.put_detail(merged);
    }

    pub fn remove_detail(&mut self, id: &str) -> Option<GuestRequestDto> {
        self.details.remove(id)
    }

    // ── Invalidation ────────────────────────────────────────────

    pub fn invalidate_lists(&mut self) {
        self.lists.clear();
        self.rooms.clear();
    }

    pub fn invalidate_stats(&mut self) {
        self.stats.clear();
    }

    pub fn clear(&mut self) {
        self.lists.clear();
        self.details.clear();
        self.stats.clear();
        self.rooms.clear();
    }

    // ── Optimistic status ───────────────────────────────────────

    /// Sets the cached request's status now and bumps its `updatedAt`.
    /// With nothing cached for `id` there is nothing to patch, but the
    /// snapshot is still returned so the caller's flow stays uniform.
    pub fn apply_optimistic_status(&mut self, id: &str, status: RequestStatus) -> StatusSnapshot {
        let previous = self.details.get(id).cloned();
        if let Some(cached) = self.details.get_mut(id) {
            cached.status = status;
            cached.updated_at = Utc::now();
        }
        StatusSnapshot {
            id: id.to_string(),
            status,
            previous,
        }
    }

    /// Replaces the speculative entry with the server's copy. The lists and
    /// stats that count statuses are stale either way.
    pub fn commit_status(&mut self, snapshot: StatusSnapshot, confirmed: GuestRequestDto) {
        debug_assert_eq!(snapshot.id, confirmed.id);
        self.refresh_detail(confirmed);
        self.invalidate_lists();
        self.invalidate_stats();
    }

    /// Puts back exactly what was cached before the optimistic change.
    pub fn roll_back(&mut self, snapshot: StatusSnapshot) {
        match snapshot.previous {
            Some(previous) => {
                self.details.insert(snapshot.id, previous);
            }
            None => {
                self.details.remove(&snapshot.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::{Priority, RequestType};
    use crate::interfaces::http::modules::hotels::HotelSummaryDto;

    fn request(id: &str, status: RequestStatus) -> GuestRequestDto {
        let now = Utc::now();
        GuestRequestDto {
            id: id.to_string(),
            hotel_id: "h1".to_string(),
            guest_name: "Guest".to_string(),
            room_number: Some("204".to_string()),
            request_type: RequestType::Towels,
            description: None,
            status,
            priority: Priority::Medium,
            assigned_to_id: None,
            assigned_to: None,
            hotel: Some(HotelSummaryDto {
                id: "h1".to_string(),
                name: "Harbour View".to_string(),
                address: None,
            }),
            created_at: now,
            updated_at: now,
            estimated_completion: None,
        }
    }

    #[test]
    fn optimistic_status_is_visible_then_rolled_back() {
        let mut cache = RequestCache::new();
        let original = request("r1", RequestStatus::Pending);
        cache.put_detail(original.clone());

        let snapshot = cache.apply_optimistic_status("r1", RequestStatus::InProgress);
        assert_eq!(snapshot.request_id(), "r1");
        assert_eq!(snapshot.status(), RequestStatus::InProgress);
        assert_eq!(cache.detail("r1").unwrap().status, RequestStatus::InProgress);

        cache.roll_back(snapshot);
        assert_eq!(cache.detail("r1"), Some(&original));
    }

    #[test]
    fn refresh_keeps_cached_hotel_summary() {
        let mut cache = RequestCache::new();
        cache.put_detail(request("r1", RequestStatus::Pending));

        let mut assigned = request("r1", RequestStatus::Pending);
        assigned.hotel = None;
        assigned.assigned_to_id = Some("e1".into());
        cache.refresh_detail(assigned);

        let cached = cache.detail("r1").unwrap();
        assert_eq!(cached.assigned_to_id.as_deref(), Some("e1"));
        assert_eq!(cached.hotel.as_ref().map(|h| h.name.as_str()), Some("Harbour View"));

        let mut bare = request("r2", RequestStatus::Done);
        bare.hotel = None;
        cache.refresh_detail(bare);
        assert!(cache.detail("r2").unwrap().hotel.is_none());
    }

    #[test]
    fn rollback_without_prior_entry_leaves_nothing_behind() {
        let mut cache = RequestCache::new();
        let snapshot = cache.apply_optimistic_status("ghost", RequestStatus::Done);
        assert!(cache.detail("ghost").is_none());
        cache.roll_back(snapshot);
        assert!(cache.detail("ghost").is_none());
    }

    #[test]
    fn commit_keeps_hotel_summary_and_invalidates_aggregates() {
        let mut cache = RequestCache::new();
        cache.put_detail(request("r1", RequestStatus::Pending));
        let params = ListRequestsParams {
            hotel_id: Some("h1".into()),
            ..Default::default()
        };
        cache.put_list(
            &params,
            ListRequestsResponse {
                requests: vec![],
                total: 0,
                page: 1,
                limit: 10,
            },
        );
        cache.put_stats(
            "h1",
            RequestStatsDto {
                pending: 1,
                in_progress: 0,
                done: 0,
                total: 1,
            },
        );

        let snapshot = cache.apply_optimistic_status("r1", RequestStatus::Done);
        let mut confirmed = request("r1", RequestStatus::Done);
        confirmed.hotel = None;
        cache.commit_status(snapshot, confirmed);

        let cached = cache.detail("r1").unwrap();
        assert_eq!(cached.status, RequestStatus::Done);
        assert!(cached.hotel.is_some());
        assert!(cache.list(&params).is_none());
        assert!(cache.stats("h1").is_none());
    }

    #[test]
    fn list_key_ignores_unset_fields() {
        let a = ListRequestsParams {
            hotel_id: Some("h1".into()),
            page: Some(2),
            ..Default::default()
        };
        let b = ListRequestsParams {
            page: Some(2),
            hotel_id: Some("h1".into()),
            ..Default::default()
        };
        assert_eq!(ListKey::from(&a), ListKey::from(&b));
        assert_ne!(ListKey::from(&a), ListKey::from(&ListRequestsParams::default()));
    }
}
