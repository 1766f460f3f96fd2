//! Guest request handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AssignRequestBody, CreateRequestBody, GuestRequestDto, HotelScopeParams, ListRequestsParams,
    ListRequestsResponse, MessageResponse, RequestStatsDto, UpdateRequestBody, UpdateStatusBody,
};
use crate::application::RequestService;
use crate::domain::request::{
    Priority, RequestFilter, RequestQuery, RequestSort, RequestStatus, RequestType, SortField,
    SortOrder,
};
use crate::interfaces::http::common::{
    non_empty, required_hotel_id, ApiError, ApiQuery, ErrorBody, ValidatedJson,
};
use crate::support::pagination::{PageRequest, PaginationConfig};

/// Request handler state
#[derive(Clone)]
pub struct RequestHandlerState {
    pub service: Arc<RequestService>,
    pub pagination: PaginationConfig,
}

fn build_query(params: ListRequestsParams, pagination: &PaginationConfig) -> Result<RequestQuery, ApiError> {
    const OP: &str = "Failed to fetch requests";

    let hotel_id = required_hotel_id(params.hotel_id)?;
    let filter = RequestFilter {
        status: non_empty(params.status)
            .map(|s| s.parse::<RequestStatus>())
            .transpose()
            .map_err(ApiError::context(OP))?,
        request_type: non_empty(params.request_type)
            .map(|s| s.parse::<RequestType>())
            .transpose()
            .map_err(ApiError::context(OP))?,
        priority: non_empty(params.priority)
            .map(|s| s.parse::<Priority>())
            .transpose()
            .map_err(ApiError::context(OP))?,
        room_number: non_empty(params.room_number),
        assigned_to_id: non_empty(params.assigned_to_id),
    };
    let sort = RequestSort::new(
        params.sort_by.as_deref().map(SortField::parse_lenient).unwrap_or_default(),
        params.sort_order.as_deref().map(SortOrder::parse_lenient).unwrap_or_default(),
    );
    let page = PageRequest::new(
        params.page.map(|p| p.max(1) as u64),
        params.limit.map(|l| l.max(1) as u64),
        pagination,
    );

    Ok(RequestQuery {
        hotel_id,
        filter,
        sort,
        page,
    })
}

#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    params(ListRequestsParams),
    responses(
        (status = 200, description = "One page of matching requests", body = ListRequestsResponse),
        (status = 400, description = "Missing hotelId or bad filter value", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_requests(
    State(state): State<RequestHandlerState>,
    ApiQuery(params): ApiQuery<ListRequestsParams>,
) -> Result<Json<ListRequestsResponse>, ApiError> {
    let query = build_query(params, &state.pagination)?;
    let page = state
        .service
        .list(&query)
        .await
        .map_err(ApiError::context("Failed to fetch requests"))?;

    Ok(Json(ListRequestsResponse {
        total: page.total,
        page: page.page,
        limit: page.limit,
        requests: page.items.into_iter().map(GuestRequestDto::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = GuestRequestDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Hotel not found", body = ErrorBody)
    )
)]
pub async fn create_request(
    State(state): State<RequestHandlerState>,
    ValidatedJson(body): ValidatedJson<CreateRequestBody>,
) -> Result<(StatusCode, Json<GuestRequestDto>), ApiError> {
    const OP: &str = "Failed to create request";

    let input = body.into_new_request().map_err(ApiError::context(OP))?;
    let created = state.service.create(input).await.map_err(ApiError::context(OP))?;
    Ok((StatusCode::CREATED, Json(GuestRequestDto::from(created))))
}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = String, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request with hotel summary", body = GuestRequestDto),
        (status = 404, description = "Request not found", body = ErrorBody)
    )
)]
pub async fn get_request(
    State(state): State<RequestHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<GuestRequestDto>, ApiError> {
    let detail = state
        .service
        .get(&id)
        .await
        .map_err(ApiError::context("Failed to fetch request"))?;
    Ok(Json(GuestRequestDto::from(detail)))
}

#[utoipa::path(
    patch,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = String, Path, description = "Request ID")),
    request_body = UpdateRequestBody,
    responses(
        (status = 200, description = "Updated request with hotel summary", body = GuestRequestDto),
        (status = 400, description = "Validation error or invalid assignee", body = ErrorBody),
        (status = 404, description = "Request or employee not found", body = ErrorBody)
    )
)]
pub async fn update_request(
    State(state): State<RequestHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateRequestBody>,
) -> Result<Json<GuestRequestDto>, ApiError> {
    const OP: &str = "Failed to update request";

    let changes = body.into_changes().map_err(ApiError::context(OP))?;
    let detail = state.service.update(&id, changes).await.map_err(ApiError::context(OP))?;
    Ok(Json(GuestRequestDto::from(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = String, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request deleted", body = MessageResponse),
        (status = 404, description = "Request not found", body = ErrorBody)
    )
)]
pub async fn delete_request(
    State(state): State<RequestHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .service
        .delete(&id)
        .await
        .map_err(ApiError::context("Failed to delete request"))?;
    Ok(Json(MessageResponse {
        message: "Request deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/requests/{id}/status",
    tag = "Requests",
    params(("id" = String, Path, description = "Request ID")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Request with new status", body = GuestRequestDto),
        (status = 400, description = "Invalid status", body = ErrorBody),
        (status = 404, description = "Request not found", body = ErrorBody)
    )
)]
pub async fn update_request_status(
    State(state): State<RequestHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateStatusBody>,
) -> Result<Json<GuestRequestDto>, ApiError> {
    const OP: &str = "Failed to update request status";

    // The value is checked before the request is looked up.
    let status = body
        .status
        .unwrap_or_default()
        .parse::<RequestStatus>()
        .map_err(ApiError::context(OP))?;

    let updated = state
        .service
        .update_status(&id, status)
        .await
        .map_err(ApiError::context(OP))?;
    Ok(Json(GuestRequestDto::from(updated)))
}

#[utoipa::path(
    patch,
    path = "/api/requests/{id}/assign",
    tag = "Requests",
    params(("id" = String, Path, description = "Request ID")),
    request_body = AssignRequestBody,
    responses(
        (status = 200, description = "Request with assignee", body = GuestRequestDto),
        (status = 400, description = "Missing employee, other hotel, or inactive employee", body = ErrorBody),
        (status = 404, description = "Request or employee not found", body = ErrorBody)
    )
)]
pub async fn assign_request(
    State(state): State<RequestHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<AssignRequestBody>,
) -> Result<Json<GuestRequestDto>, ApiError> {
    let employee_id = body.assigned_to_id.unwrap_or_default();
    let assigned = state
        .service
        .assign(&id, &employee_id)
        .await
        .map_err(ApiError::context("Failed to assign request"))?;
    Ok(Json(GuestRequestDto::from(assigned)))
}

#[utoipa::path(
    get,
    path = "/api/requests/stats",
    tag = "Requests",
    params(HotelScopeParams),
    responses(
        (status = 200, description = "Counts per status", body = RequestStatsDto),
        (status = 400, description = "Missing hotelId", body = ErrorBody)
    )
)]
pub async fn request_stats(
    State(state): State<RequestHandlerState>,
    ApiQuery(params): ApiQuery<HotelScopeParams>,
) -> Result<Json<RequestStatsDto>, ApiError> {
    let hotel_id = required_hotel_id(params.hotel_id)?;
    let stats = state
        .service
        .stats(&hotel_id)
        .await
        .map_err(ApiError::context("Failed to fetch request stats"))?;
    Ok(Json(RequestStatsDto::from(stats)))
}

#[utoipa::path(
    get,
    path = "/api/requests/room/{room_number}",
    tag = "Requests",
    params(
        ("room_number" = String, Path, description = "Exact room number"),
        HotelScopeParams
    ),
    responses(
        (status = 200, description = "Requests for the room, newest first", body = Vec<GuestRequestDto>),
        (status = 400, description = "Missing hotelId", body = ErrorBody)
    )
)]
pub async fn requests_by_room(
    State(state): State<RequestHandlerState>,
    Path(room_number): Path<String>,
    ApiQuery(params): ApiQuery<HotelScopeParams>,
) -> Result<Json<Vec<GuestRequestDto>>, ApiError> {
    let hotel_id = required_hotel_id(params.hotel_id)?;
    let requests = state
        .service
        .by_room(&hotel_id, &room_number)
        .await
        .map_err(ApiError::context("Failed to fetch room requests"))?;
    Ok(Json(requests.into_iter().map(GuestRequestDto::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(hotel_id: Option<&str>) -> ListRequestsParams {
        ListRequestsParams {
            hotel_id: hotel_id.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn query_requires_hotel_id() {
        let cfg = PaginationConfig::default();
        let err = build_query(params(None), &cfg).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.error, "Hotel ID is required");
        assert!(build_query(params(Some("")), &cfg).is_err());
    }

    #[test]
    fn query_applies_defaults_and_clamps() {
        let cfg = PaginationConfig::default();
        let mut p = params(Some("h1"));
        p.page = Some(-3);
        p.limit = Some(1000);
        p.sort_by = Some("nonsense".into());
        p.sort_order = Some("sideways".into());

        let q = build_query(p, &cfg).unwrap();
        assert_eq!(q.page, PageRequest { page: 1, limit: 100 });
        assert_eq!(q.sort, RequestSort::default());
    }

    #[test]
    fn query_rejects_unknown_enum_filter() {
        let mut p = params(Some("h1"));
        p.status = Some("archived".into());
        let err = build_query(p, &PaginationConfig::default()).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.error, "Invalid status");
    }

    #[test]
    fn empty_filter_values_are_ignored() {
        let mut p = params(Some("h1"));
        p.priority = Some(String::new());
        p.room_number = Some(String::new());
        let q = build_query(p, &PaginationConfig::default()).unwrap();
        assert_eq!(q.filter, RequestFilter::default());
    }
}
