//! Pass-through routes. Each one validates its input, makes one upstream call and
//! returns the upstream JSON body as-is.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use stays_common::liteapi::paths;

use crate::error::AppError;
use crate::server::AppState;
use crate::validation::{location_query, parse_json_body, validate_id, validate_rates_body};

type ForwardedQuery = Query<Vec<(String, String)>>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchQuery {
    pub city_name: Option<String>,
    pub country_code: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl HotelSearchQuery {
    pub fn upstream_query(&self) -> Result<Vec<(String, String)>, AppError> {
        location_query(
            self.city_name.as_deref(),
            self.country_code.as_deref(),
            self.limit.as_deref(),
            self.offset.as_deref(),
        )
    }
}

pub async fn search_hotels(
    State(state): State<AppState>,
    Query(params): Query<HotelSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let query = params.upstream_query()?;
    info!(
        city = params.city_name.as_deref().unwrap_or(""),
        country = params.country_code.as_deref().unwrap_or(""),
        "hotel search"
    );
    Ok(Json(state.liteapi.get(paths::HOTELS, &query).await?))
}

pub async fn hotel_details(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let hotel_id = validate_id("Hotel ID", &hotel_id)?;
    let query = [("hotelId".to_string(), hotel_id.to_string())];
    Ok(Json(state.liteapi.get(paths::HOTEL, &query).await?))
}

pub async fn rates(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    let body = parse_json_body(&body)?;
    validate_rates_body(&body)?;
    Ok(Json(state.liteapi.post(paths::HOTEL_RATES, &body).await?))
}

pub async fn hotel_rates(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    forward_post(&state, paths::HOTEL_RATES, &body).await
}

pub async fn min_rates(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    forward_post(&state, paths::HOTEL_MIN_RATES, &body).await
}

pub async fn prebook(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    forward_post(&state, paths::PREBOOK, &body).await
}

pub async fn book(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    forward_post(&state, paths::BOOK, &body).await
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): ForwardedQuery,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.liteapi.get(paths::BOOKINGS, &query).await?))
}

pub async fn booking_details(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_id = validate_id("Booking ID", &booking_id)?;
    Ok(Json(state.liteapi.get(&paths::booking(booking_id), &[]).await?))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_id = validate_id("Booking ID", &booking_id)?;
    info!(booking_id, "cancelling booking");
    Ok(Json(state.liteapi.delete(&paths::booking(booking_id)).await?))
}

pub async fn cities(
    State(state): State<AppState>,
    Query(query): ForwardedQuery,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.liteapi.get(paths::CITIES, &query).await?))
}

pub async fn countries(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.liteapi.get(paths::COUNTRIES, &[]).await?))
}

pub async fn facilities(
    State(state): State<AppState>,
    Query(query): ForwardedQuery,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.liteapi.get(paths::FACILITIES, &query).await?))
}

pub async fn reviews(
    State(state): State<AppState>,
    Query(query): ForwardedQuery,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.liteapi.get(paths::REVIEWS, &query).await?))
}

async fn forward_post(state: &AppState, path: &str, body: &Bytes) -> Result<Json<Value>, AppError> {
    let body = parse_json_body(body)?;
    Ok(Json(state.liteapi.post(path, &body).await?))
}
