//! Hotel handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{CreateHotelRequest, HotelDto};
use crate::application::HotelService;
use crate::domain::hotel::NewHotel;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};

/// Hotel handler state
#[derive(Clone)]
pub struct HotelHandlerState {
    pub service: Arc<HotelService>,
}

#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "Hotels",
    responses(
        (status = 200, description = "All hotels, newest first", body = Vec<HotelDto>),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_hotels(
    State(state): State<HotelHandlerState>,
) -> Result<Json<Vec<HotelDto>>, ApiError> {
    let hotels = state
        .service
        .list()
        .await
        .map_err(ApiError::context("Failed to fetch hotels"))?;
    Ok(Json(hotels.into_iter().map(HotelDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/hotels",
    tag = "Hotels",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelDto),
        (status = 400, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_hotel(
    State(state): State<HotelHandlerState>,
    ValidatedJson(body): ValidatedJson<CreateHotelRequest>,
) -> Result<(StatusCode, Json<HotelDto>), ApiError> {
    let hotel = state
        .service
        .create(NewHotel {
            name: body.name,
            address: body.address,
        })
        .await
        .map_err(ApiError::context("Failed to create hotel"))?;
    Ok((StatusCode::CREATED, Json(HotelDto::from(hotel))))
}
