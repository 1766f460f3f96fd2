//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{EmployeeService, HotelService, RequestService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ErrorBody, FieldError};
use crate::support::pagination::PaginationConfig;

use super::modules::{
    employees, health, hotels, metrics, request_id::request_id_middleware, requests,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Hotels
        hotels::list_hotels,
        hotels::create_hotel,
        // Employees
        employees::list_employees,
        // Requests
        requests::list_requests,
        requests::create_request,
        requests::request_stats,
        requests::requests_by_room,
        requests::get_request,
        requests::update_request,
        requests::delete_request,
        requests::update_request_status,
        requests::assign_request,
    ),
    components(
        schemas(
            // Common
            ErrorBody,
            FieldError,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Hotels
            hotels::HotelDto,
            hotels::HotelSummaryDto,
            hotels::CreateHotelRequest,
            // Employees
            employees::EmployeeDto,
            // Requests
            requests::GuestRequestDto,
            requests::ListRequestsResponse,
            requests::RequestStatsDto,
            requests::MessageResponse,
            requests::CreateRequestBody,
            requests::UpdateRequestBody,
            requests::UpdateStatusBody,
            requests::AssignRequestBody,
        )
    ),
    tags(
        (name = "Health", description = "Service and database reachability"),
        (name = "Hotels", description = "Tenant registration and listing"),
        (name = "Employees", description = "Hotel staff lookup by role and activity"),
        (name = "Requests", description = "Guest requests: filtering, lifecycle, assignment, stats"),
    ),
    info(
        title = "Hotel Desk API",
        version = "1.0.0",
        description = "REST API for tracking hotel guest requests across tenants",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    pagination: PaginationConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    // ── Per-module states ──────────────────────────────────────
    let hotel_state = hotels::HotelHandlerState {
        service: Arc::new(HotelService::new(repos.clone())),
    };
    let employee_state = employees::EmployeeHandlerState {
        service: Arc::new(EmployeeService::new(repos.clone())),
    };
    let request_state = requests::RequestHandlerState {
        service: Arc::new(RequestService::new(repos.clone())),
        pagination,
    };
    let health_state = health::HealthState {
        repos,
        started_at: Arc::new(Instant::now()),
    };

    let hotel_routes = Router::new()
        .route("/", get(hotels::list_hotels).post(hotels::create_hotel))
        .with_state(hotel_state);

    let employee_routes = Router::new()
        .route("/", get(employees::list_employees))
        .with_state(employee_state);

    // `/stats` and `/room/..` take precedence over `/{id}`.
    let request_routes = Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/stats", get(requests::request_stats))
        .route("/room/{room_number}", get(requests::requests_by_room))
        .route(
            "/{id}",
            get(requests::get_request)
                .patch(requests::update_request)
                .delete(requests::delete_request),
        )
        .route("/{id}/status", patch(requests::update_request_status))
        .route("/{id}/assign", patch(requests::assign_request))
        .with_state(request_state);

    let api_routes = Router::new()
        .nest("/hotels", hotel_routes)
        .nest("/employees", employee_routes)
        .nest("/requests", request_routes);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check).with_state(health_state))
        // Resources
        .nest("/api", api_routes);

    if let Some(handle) = metrics_handle {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    // Outermost last: the request-id span wraps tracing and metrics.
    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
}
