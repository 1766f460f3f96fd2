//! Router-level tests over the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use hotel_desk::domain::{Employee, EmployeeRole, Hotel, RepositoryProvider};
use hotel_desk::support::pagination::PaginationConfig;
use hotel_desk::{create_api_router, InMemoryRepositoryProvider};

struct TestApp {
    router: Router,
    repos: Arc<dyn RepositoryProvider>,
}

impl TestApp {
    fn new() -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let router = create_api_router(repos.clone(), PaginationConfig::default(), None);
        Self { router, repos }
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body)).await
    }

    async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PATCH, uri, Some(body)).await
    }

    async fn hotel(&self, name: &str) -> String {
        let hotel = Hotel::new(name, None);
        let id = hotel.id.clone();
        self.repos.hotels().save(hotel).await.unwrap();
        id
    }

    async fn employee(&self, hotel_id: &str, name: &str, active: bool) -> String {
        let mut employee = Employee::new(hotel_id, name, EmployeeRole::Housekeeping);
        employee.is_active = active;
        let id = employee.id.clone();
        self.repos.employees().save(employee).await.unwrap();
        id
    }

    async fn request(&self, hotel_id: &str, guest: &str, room: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/requests",
                json!({
                    "hotelId": hotel_id,
                    "guestName": guest,
                    "roomNumber": room,
                    "requestType": "cleaning"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

// ── Hotels ──────────────────────────────────────────────────────

#[tokio::test]
async fn hotel_name_is_required() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/hotels", json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "name");

    let (status, body) = app.post("/api/hotels", json!({ "name": "Overlook" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Overlook");
    assert!(body["address"].is_null());

    let (_, list) = app.get("/api/hotels").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

// ── Employees ───────────────────────────────────────────────────

#[tokio::test]
async fn employees_are_scoped_and_filtered() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    let other = app.hotel("Overlook").await;
    app.employee(&hotel, "Norman", true).await;
    app.employee(&hotel, "Alma", false).await;
    app.employee(&other, "Delbert", true).await;

    let (status, body) = app.get("/api/employees").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Hotel ID is required");

    let (_, body) = app.get(&format!("/api/employees?hotelId={hotel}")).await;
    let names: Vec<_> = body.as_array().unwrap().iter().map(|e| e["name"].clone()).collect();
    assert_eq!(names, vec![json!("Alma"), json!("Norman")]);

    let (_, body) = app
        .get(&format!("/api/employees?hotelId={hotel}&isActive=true"))
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = app
        .get(&format!("/api/employees?hotelId={hotel}&role=chef"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Requests: create / list ─────────────────────────────────────

#[tokio::test]
async fn create_defaults_to_medium_priority() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;

    let body = app.request(&hotel, "Marion", "1").await;
    assert_eq!(body["priority"], "medium");
    assert_eq!(body["status"], "pending");
    assert!(body["assignedTo"].is_null());

    let (status, body) = app
        .post(
            "/api/requests",
            json!({
                "hotelId": hotel,
                "guestName": "Lila",
                "requestType": "towels",
                "priority": "high"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["priority"], "high");
}

#[tokio::test]
async fn create_reports_field_errors_and_missing_hotel() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/requests",
            json!({ "hotelId": "nope", "guestName": "", "requestType": "spa" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["guestName", "hotelId", "requestType"]);

    let (status, body) = app
        .post(
            "/api/requests",
            json!({
                "hotelId": uuid::Uuid::new_v4().to_string(),
                "guestName": "Sam",
                "requestType": "other"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Hotel not found");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/hotels")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_requires_hotel_and_isolates_tenants() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    let other = app.hotel("Overlook").await;
    for i in 0..7 {
        app.request(&hotel, &format!("Guest {i}"), &format!("{}", 100 + i)).await;
    }
    app.request(&other, "Jack", "237").await;

    let (status, body) = app.get("/api/requests").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Hotel ID is required" }));

    let (status, body) = app
        .get(&format!("/api/requests?hotelId={hotel}&page=2&limit=5"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 7);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 5);
    let requests = body["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r["hotelId"] == json!(hotel)));
}

#[tokio::test]
async fn far_page_is_empty_with_real_total() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    for i in 0..3 {
        app.request(&hotel, &format!("Guest {i}"), "1").await;
    }

    let (status, body) = app
        .get(&format!(
            "/api/requests?hotelId={hotel}&page=9223372036854775807&limit=100"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requests"], json!([]));
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], json!(i64::MAX));
}

#[tokio::test]
async fn whitespace_guest_name_is_accepted() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;

    let (status, created) = app
        .post(
            "/api/requests",
            json!({ "hotelId": hotel, "guestName": "   ", "requestType": "towels" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["guestName"], "   ");

    let id = created["id"].as_str().unwrap();
    let (status, updated) = app
        .patch(&format!("/api/requests/{id}"), json!({ "guestName": " " }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["guestName"], " ");

    let (status, body) = app
        .patch(&format!("/api/requests/{id}"), json!({ "guestName": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "guestName");
}

#[tokio::test]
async fn empty_employee_filters_are_ignored() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    app.employee(&hotel, "Norman", true).await;
    app.employee(&hotel, "Emma", false).await;

    let (status, body) = app
        .get(&format!("/api/employees?hotelId={hotel}&role=&isActive="))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app
        .get(&format!("/api/employees?hotelId={hotel}&isActive=false"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Emma");

    let (status, body) = app
        .get(&format!("/api/employees?hotelId={hotel}&isActive=maybe"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "isActive");
}

#[tokio::test]
async fn long_hotel_names_are_accepted() {
    let app = TestApp::new();
    let name = "B".repeat(201);
    let (status, body) = app.post("/api/hotels", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], json!(name));
}

#[tokio::test]
async fn list_filters_and_sorts() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;

    for (guest, room, priority) in [("A", "12B", "low"), ("B", "120", "high"), ("C", "7", "medium")] {
        let (status, _) = app
            .post(
                "/api/requests",
                json!({
                    "hotelId": hotel,
                    "guestName": guest,
                    "roomNumber": room,
                    "requestType": "slippers",
                    "priority": priority
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app
        .get(&format!("/api/requests?hotelId={hotel}&roomNumber=12b"))
        .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["requests"][0]["guestName"], "A");

    let (_, body) = app
        .get(&format!("/api/requests?hotelId={hotel}&sortBy=priority&sortOrder=asc"))
        .await;
    let order: Vec<_> = body["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["priority"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["low", "medium", "high"]);

    let (_, body) = app
        .get(&format!("/api/requests?hotelId={hotel}&sortBy=guestName&sortOrder=desc"))
        .await;
    assert_eq!(body["requests"][0]["guestName"], "C");

    let (status, body) = app
        .get(&format!("/api/requests?hotelId={hotel}&priority=urgent"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "priority");
}

// ── Requests: status ────────────────────────────────────────────

#[tokio::test]
async fn every_status_can_be_set_and_read_back() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    let id = app.request(&hotel, "Marion", "1").await["id"]
        .as_str()
        .unwrap()
        .to_string();

    for status in ["in_progress", "done", "pending", "done"] {
        let (code, body) = app
            .patch(&format!("/api/requests/{id}/status"), json!({ "status": status }))
            .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["status"], status);

        let (_, detail) = app.get(&format!("/api/requests/{id}")).await;
        assert_eq!(detail["status"], status);
    }
}

#[tokio::test]
async fn invalid_status_is_rejected_without_change() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    let id = app.request(&hotel, "Marion", "1").await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (code, body) = app
        .patch(&format!("/api/requests/{id}/status"), json!({ "status": "archived" }))
        .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status");

    let (code, _) = app.patch(&format!("/api/requests/{id}/status"), json!({})).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (_, detail) = app.get(&format!("/api/requests/{id}")).await;
    assert_eq!(detail["status"], "pending");

    let (code, body) = app
        .patch("/api/requests/missing/status", json!({ "status": "done" }))
        .await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Request not found");
}

// ── Requests: assignment ────────────────────────────────────────

#[tokio::test]
async fn assignment_rules() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    let other = app.hotel("Overlook").await;
    let active = app.employee(&hotel, "Norman", true).await;
    let inactive = app.employee(&hotel, "Alma", false).await;
    let foreign = app.employee(&other, "Delbert", true).await;
    let id = app.request(&hotel, "Marion", "1").await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/requests/{id}/assign");

    let (code, body) = app.patch(&uri, json!({ "assignedToId": foreign })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Employee does not belong to the same hotel");

    let (code, body) = app.patch(&uri, json!({ "assignedToId": inactive })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Employee is not active");

    let (code, body) = app.patch(&uri, json!({ "assignedToId": "ghost" })).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee not found");

    let (code, _) = app.patch(&uri, json!({ "assignedToId": "" })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (_, detail) = app.get(&format!("/api/requests/{id}")).await;
    assert!(detail["assignedToId"].is_null());

    let (code, body) = app.patch(&uri, json!({ "assignedToId": active })).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["assignedToId"], json!(active));
    assert_eq!(body["assignedTo"]["name"], "Norman");

    let (_, body) = app
        .get(&format!("/api/requests?hotelId={hotel}&assignedToId={active}"))
        .await;
    assert_eq!(body["total"], 1);
}

// ── Requests: detail / update / delete ──────────────────────────

#[tokio::test]
async fn detail_update_and_delete() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    let id = app.request(&hotel, "Marion", "1").await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/requests/{id}");

    let (code, detail) = app.get(&uri).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(detail["hotel"]["name"], "Bates Motel");

    let (code, _) = app.patch(&uri, json!({ "hotelId": hotel })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, updated) = app
        .patch(
            &uri,
            json!({ "roomNumber": null, "description": "Extra pillows", "priority": "high" }),
        )
        .await;
    assert_eq!(code, StatusCode::OK);
    assert!(updated["roomNumber"].is_null());
    assert_eq!(updated["description"], "Extra pillows");
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["guestName"], "Marion");
    assert_eq!(updated["hotel"]["id"], json!(hotel));

    let (code, body) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["message"], "Request deleted successfully");

    let (code, _) = app.get(&uri).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    let (code, _) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

// ── Stats / by room ─────────────────────────────────────────────

#[tokio::test]
async fn stats_count_each_status() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;

    let mut ids = Vec::new();
    for i in 0..6 {
        let body = app.request(&hotel, &format!("Guest {i}"), "1").await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }
    for (id, status) in ids[3..].iter().zip(["in_progress", "in_progress", "done"]) {
        app.patch(&format!("/api/requests/{id}/status"), json!({ "status": status }))
            .await;
    }

    let (status, body) = app.get("/api/requests/stats").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Hotel ID is required");

    let (status, body) = app.get(&format!("/api/requests/stats?hotelId={hotel}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "pending": 3, "inProgress": 2, "done": 1, "total": 6 }));
}

#[tokio::test]
async fn requests_by_room_match_exactly() {
    let app = TestApp::new();
    let hotel = app.hotel("Bates Motel").await;
    app.request(&hotel, "Marion", "1").await;
    app.request(&hotel, "Sam", "1").await;
    app.request(&hotel, "Lila", "10").await;

    let (status, _) = app.get("/api/requests/room/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get(&format!("/api/requests/room/1?hotelId={hotel}")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["roomNumber"] == "1"));
}

// ── Operational ─────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok_with_request_id() {
    let app = TestApp::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn openapi_document_lists_request_paths() {
    let app = TestApp::new();
    let (status, body) = app.get("/api-doc/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/requests/{id}/assign"].is_object());
    assert!(body["paths"]["/api/requests/stats"].is_object());
}

#[tokio::test]
async fn metrics_route_is_absent_without_recorder() {
    let app = TestApp::new();
    let (status, _) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
