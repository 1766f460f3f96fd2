//! In-memory storage implementation
//!
//! Backs every repository with a `DashMap`. Used for tests and for running
//! the service without a database file.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::employee::{Employee, EmployeeFilter, EmployeeRepository};
use crate::domain::hotel::{Hotel, HotelRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::request::{
    AssignedRequest, GuestRequest, RequestQuery, RequestRepository, RequestSort, RequestStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::support::pagination::PaginatedResult;

#[derive(Default)]
struct Tables {
    hotels: DashMap<String, Hotel>,
    employees: DashMap<String, Employee>,
    requests: DashMap<String, GuestRequest>,
}

impl Tables {
    fn with_assignee(&self, request: GuestRequest) -> AssignedRequest {
        let assigned_to = request
            .assigned_to_id
            .as_deref()
            .and_then(|id| self.employees.get(id).map(|e| e.clone()));
        AssignedRequest {
            request,
            assigned_to,
        }
    }
}

/// In-memory repository provider for development and testing
pub struct InMemoryRepositoryProvider {
    hotels: InMemoryHotelRepository,
    employees: InMemoryEmployeeRepository,
    requests: InMemoryRequestRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let tables = Arc::new(Tables::default());
        Self {
            hotels: InMemoryHotelRepository(tables.clone()),
            employees: InMemoryEmployeeRepository(tables.clone()),
            requests: InMemoryRequestRepository(tables),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn employees(&self) -> &dyn EmployeeRepository {
        &self.employees
    }

    fn requests(&self) -> &dyn RequestRepository {
        &self.requests
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

// ── Hotels ──────────────────────────────────────────────────────

struct InMemoryHotelRepository(Arc<Tables>);

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn save(&self, hotel: Hotel) -> DomainResult<()> {
        if self.0.hotels.contains_key(&hotel.id) {
            return Err(DomainError::Storage(format!("Hotel {} already exists", hotel.id)));
        }
        self.0.hotels.insert(hotel.id.clone(), hotel);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Hotel>> {
        Ok(self.0.hotels.get(id).map(|h| h.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let mut hotels: Vec<Hotel> = self.0.hotels.iter().map(|e| e.value().clone()).collect();
        hotels.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(hotels)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.0.hotels.len() as u64)
    }
}

// ── Employees ───────────────────────────────────────────────────

struct InMemoryEmployeeRepository(Arc<Tables>);

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn save(&self, employee: Employee) -> DomainResult<()> {
        if !self.0.hotels.contains_key(&employee.hotel_id) {
            return Err(DomainError::Storage(format!(
                "Foreign key violation: hotel {} does not exist",
                employee.hotel_id
            )));
        }
        self.0.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Employee>> {
        Ok(self.0.employees.get(id).map(|e| e.clone()))
    }

    async fn find(&self, filter: &EmployeeFilter) -> DomainResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self
            .0
            .employees
            .iter()
            .filter(|e| filter.matches(e.value()))
            .map(|e| e.value().clone())
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(employees)
    }
}

// ── Guest requests ──────────────────────────────────────────────

struct InMemoryRequestRepository(Arc<Tables>);

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn save(&self, request: GuestRequest) -> DomainResult<()> {
        if !self.0.hotels.contains_key(&request.hotel_id) {
            return Err(DomainError::Storage(format!(
                "Foreign key violation: hotel {} does not exist",
                request.hotel_id
            )));
        }
        self.0.requests.insert(request.id.clone(), request);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<GuestRequest>> {
        Ok(self.0.requests.get(id).map(|r| r.clone()))
    }

    async fn update(&self, request: GuestRequest) -> DomainResult<()> {
        match self.0.requests.get_mut(&request.id) {
            Some(mut existing) => {
                *existing = request;
                Ok(())
            }
            None => Err(DomainError::not_found("Request", request.id)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        Ok(self.0.requests.remove(id).is_some())
    }

    async fn search(&self, query: &RequestQuery) -> DomainResult<PaginatedResult<AssignedRequest>> {
        let mut matching: Vec<GuestRequest> = self
            .0
            .requests
            .iter()
            .filter(|r| query.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(query.page.limit as usize)
            .map(|r| self.0.with_assignee(r))
            .collect();
        Ok(PaginatedResult::new(items, total, query.page))
    }

    async fn find_by_room(
        &self,
        hotel_id: &str,
        room_number: &str,
    ) -> DomainResult<Vec<AssignedRequest>> {
        let mut matching: Vec<GuestRequest> = self
            .0
            .requests
            .iter()
            .filter(|r| r.hotel_id == hotel_id && r.room_number.as_deref() == Some(room_number))
            .map(|r| r.value().clone())
            .collect();
        let newest_first = RequestSort::default();
        matching.sort_by(|a, b| newest_first.compare(a, b));
        Ok(matching.into_iter().map(|r| self.0.with_assignee(r)).collect())
    }

    async fn count(&self, hotel_id: &str, status: Option<RequestStatus>) -> DomainResult<u64> {
        let count = self
            .0
            .requests
            .iter()
            .filter(|r| r.hotel_id == hotel_id && status.map_or(true, |s| r.status == s))
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::EmployeeRole;
    use crate::domain::request::{NewGuestRequest, RequestType};

    async fn seeded() -> (InMemoryRepositoryProvider, Hotel) {
        let repos = InMemoryRepositoryProvider::new();
        let hotel = Hotel::new("Overlook", None);
        repos.hotels().save(hotel.clone()).await.unwrap();
        (repos, hotel)
    }

    fn request(hotel_id: &str, room: &str) -> GuestRequest {
        GuestRequest::new(NewGuestRequest {
            hotel_id: hotel_id.to_string(),
            guest_name: "Jack".into(),
            room_number: Some(room.to_string()),
            request_type: RequestType::Towels,
            description: None,
            priority: None,
        })
    }

    #[tokio::test]
    async fn search_joins_assignee_and_counts_before_paging() {
        let (repos, hotel) = seeded().await;
        let employee = Employee::new(&hotel.id, "Dick", EmployeeRole::Maintenance);
        repos.employees().save(employee.clone()).await.unwrap();

        for room in ["237", "238", "239"] {
            let mut r = request(&hotel.id, room);
            r.assign_to(&employee.id);
            repos.requests().save(r).await.unwrap();
        }

        let mut query = RequestQuery::for_hotel(&hotel.id);
        query.page.limit = 2;
        let page = repos.requests().search(&query).await.unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].assigned_to.as_ref().map(|e| e.name.as_str()), Some("Dick"));
    }

    #[tokio::test]
    async fn requests_are_isolated_per_hotel() {
        let (repos, hotel) = seeded().await;
        let other = Hotel::new("Stanley", None);
        repos.hotels().save(other.clone()).await.unwrap();

        repos.requests().save(request(&hotel.id, "101")).await.unwrap();
        repos.requests().save(request(&other.id, "101")).await.unwrap();

        assert_eq!(repos.requests().count(&hotel.id, None).await.unwrap(), 1);
        assert_eq!(repos.requests().find_by_room(&other.id, "101").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_rejects_unknown_hotel() {
        let repos = InMemoryRepositoryProvider::new();
        let result = repos.requests().save(request("missing", "1")).await;
        assert!(matches!(result, Err(DomainError::Storage(_))));
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let (repos, hotel) = seeded().await;
        let r = request(&hotel.id, "1");
        let id = r.id.clone();
        repos.requests().save(r).await.unwrap();

        assert!(repos.requests().delete(&id).await.unwrap());
        assert!(!repos.requests().delete(&id).await.unwrap());
    }
}
