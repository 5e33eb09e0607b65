//! Normalized routes: upstream records run through the hotel adapters, halal
//! scoring and display mapping before they reach the client.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use stays_common::adapter::{hotel_from_envelope, hotels_from_envelope, rates_from_envelope};
use stays_common::halal::{filter_halal, halal_facilities, is_halal_friendly};
use stays_common::hotel::{to_destination, to_display, with_rate, Destination, DisplayHotel};
use stays_common::liteapi::paths;
use stays_common::rates::{HotelRates, RoomRate};
use stays_common::scoring::{halal_score, sort_by_halal_score};
use stays_common::search::SearchParams;

use crate::error::AppError;
use crate::server::AppState;
use crate::validation::{location_query, optional_date, parse_json_body, validate_id, validate_rates_body};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagesQuery {
    pub city_name: Option<String>,
    pub country_code: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub halal_only: Option<String>,
    pub priced: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub guests: Option<String>,
    pub rooms: Option<String>,
    pub currency: Option<String>,
    pub guest_nationality: Option<String>,
}

impl PackagesQuery {
    fn upstream_query(&self) -> Result<Vec<(String, String)>, AppError> {
        location_query(
            self.city_name.as_deref(),
            self.country_code.as_deref(),
            self.limit.as_deref(),
            self.offset.as_deref(),
        )
    }

    /// Stay parameters for pricing. Dates are resolved against `today` so an
    /// inverted range is rejected here, before any upstream call.
    fn search_params(&self, today: NaiveDate) -> Result<SearchParams, AppError> {
        let params = SearchParams {
            checkin: optional_date("checkin", self.checkin.as_deref())?,
            checkout: optional_date("checkout", self.checkout.as_deref())?,
            guests: optional_count("guests", self.guests.as_deref())?,
            rooms: optional_count("rooms", self.rooms.as_deref())?,
            currency: non_blank(self.currency.as_deref()),
            guest_nationality: non_blank(self.guest_nationality.as_deref()),
        };
        let (checkin, checkout) = params.stay(today);
        if checkout <= checkin {
            return Err(AppError::validation("checkout must be after checkin"));
        }
        Ok(params)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationsQuery {
    pub city_name: Option<String>,
    pub country_code: Option<String>,
    pub limit: Option<String>,
}

/// Detail view of one hotel with its halal breakdown.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    #[serde(flatten)]
    pub hotel: DisplayHotel,
    pub halal_score: u8,
    pub halal_friendly: bool,
    pub halal_facilities: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumRate {
    pub hotel_id: String,
    pub currency: Option<String>,
    pub minimum_rate: Option<RoomRate>,
}

impl From<&HotelRates> for MinimumRate {
    fn from(hotel: &HotelRates) -> Self {
        let minimum_rate = hotel.minimum_rate().cloned();
        let currency = hotel
            .currency
            .clone()
            .or_else(|| minimum_rate.as_ref().and_then(|r| r.currency.clone()));
        Self {
            hotel_id: hotel.hotel_id.clone(),
            currency,
            minimum_rate,
        }
    }
}

/// Hotel cards for a location, most halal-relevant first.
pub async fn list_packages(
    State(state): State<AppState>,
    Query(params): Query<PackagesQuery>,
) -> Result<Json<Vec<DisplayHotel>>, AppError> {
    let query = params.upstream_query()?;
    let halal_only = flag("halalOnly", params.halal_only.as_deref())?;
    let priced = flag("priced", params.priced.as_deref())?;
    let today = Utc::now().date_naive();
    let search = params.search_params(today)?;

    let body = state.liteapi.get(paths::HOTELS, &query).await?;
    let mut hotels = hotels_from_envelope(&body);
    let fetched = hotels.len();
    if halal_only {
        hotels = filter_halal(hotels);
    }
    let hotels = sort_by_halal_score(hotels);
    info!(fetched, returned = hotels.len(), halal_only, priced, "packages listed");

    let mut packages: Vec<DisplayHotel> = hotels.iter().map(to_display).collect();
    if priced && !packages.is_empty() {
        let ids = packages.iter().map(|p| p.id.clone()).collect();
        let request = search.into_rates_request(ids, today);
        let body = state.liteapi.post(paths::HOTEL_RATES, &request).await?;
        let rates: HashMap<String, HotelRates> = rates_from_envelope(&body)
            .into_iter()
            .map(|r| (r.hotel_id.clone(), r))
            .collect();
        debug!(priced_hotels = rates.len(), "rates attached");

        packages = packages
            .into_iter()
            .map(|p| {
                let rate = rates.get(&p.id).and_then(HotelRates::minimum_rate);
                with_rate(p, rate)
            })
            .collect();
    }

    Ok(Json(packages))
}

pub async fn package_details(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<Json<PackageDetail>, AppError> {
    let hotel_id = validate_id("Hotel ID", &hotel_id)?;
    let query = [("hotelId".to_string(), hotel_id.to_string())];
    let body = state.liteapi.get(paths::HOTEL, &query).await?;

    let hotel = hotel_from_envelope(&body)
        .ok_or_else(|| AppError::NotFound(format!("Hotel {hotel_id} not found")))?;

    Ok(Json(PackageDetail {
        hotel: to_display(&hotel),
        halal_score: halal_score(&hotel),
        halal_friendly: is_halal_friendly(&hotel),
        halal_facilities: halal_facilities(&hotel)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }))
}

pub async fn destinations(
    State(state): State<AppState>,
    Query(params): Query<DestinationsQuery>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let query = location_query(
        params.city_name.as_deref(),
        params.country_code.as_deref(),
        params.limit.as_deref(),
        None,
    )?;
    let body = state.liteapi.get(paths::HOTELS, &query).await?;
    Ok(Json(
        hotels_from_envelope(&body).iter().map(to_destination).collect(),
    ))
}

/// Same input as `POST /rates`, reduced to the cheapest rate per hotel.
pub async fn minimum_rates(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<MinimumRate>>, AppError> {
    let body = parse_json_body(&body)?;
    validate_rates_body(&body)?;
    let upstream: Value = state.liteapi.post(paths::HOTEL_RATES, &body).await?;
    Ok(Json(
        rates_from_envelope(&upstream)
            .iter()
            .map(MinimumRate::from)
            .collect(),
    ))
}

fn flag(field: &str, value: Option<&str>) -> Result<bool, AppError> {
    match value.map(str::trim) {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(_) => Err(AppError::validation(format!("{field} must be true or false"))),
    }
}

fn optional_count(field: &str, value: Option<&str>) -> Result<Option<u32>, AppError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("{field} must be a positive integer"))),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_bool_spellings() {
        assert!(!flag("priced", None).unwrap());
        assert!(!flag("priced", Some("false")).unwrap());
        assert!(flag("priced", Some("1")).unwrap());
        assert!(flag("priced", Some(" true ")).unwrap());
        assert!(flag("priced", Some("yes")).is_err());
    }

    #[test]
    fn counts_must_be_positive() {
        assert_eq!(optional_count("guests", Some("3")).unwrap(), Some(3));
        assert_eq!(optional_count("guests", Some("")).unwrap(), None);
        assert!(optional_count("guests", Some("0")).is_err());
        assert!(optional_count("guests", Some("-1")).is_err());
    }

    #[test]
    fn search_params_come_from_query() {
        let query = PackagesQuery {
            checkin: Some("2025-03-10".into()),
            guests: Some("4".into()),
            currency: Some(" AED ".into()),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let params = query.search_params(today).unwrap();
        assert_eq!(params.checkin.map(|d| d.to_string()).as_deref(), Some("2025-03-10"));
        assert_eq!(params.checkout, None);
        assert_eq!(params.guests, Some(4));
        assert_eq!(params.currency.as_deref(), Some("AED"));

        let bad = PackagesQuery {
            checkout: Some("03/11/2025".into()),
            ..Default::default()
        };
        assert!(bad.search_params(today).is_err());
    }

    #[test]
    fn inverted_stay_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let inverted = PackagesQuery {
            checkin: Some("2025-03-10".into()),
            checkout: Some("2025-03-01".into()),
            ..Default::default()
        };
        assert_eq!(
            inverted.search_params(today).unwrap_err().to_string(),
            "checkout must be after checkin"
        );

        let same_day = PackagesQuery {
            checkin: Some("2025-03-10".into()),
            checkout: Some("2025-03-10".into()),
            ..Default::default()
        };
        assert!(same_day.search_params(today).is_err());

        let checkout_before_today = PackagesQuery {
            checkout: Some("2025-03-01".into()),
            ..Default::default()
        };
        assert!(checkout_before_today.search_params(today).is_err());
    }

    #[test]
    fn minimum_rate_currency_falls_back_to_rate() {
        use stays_common::rates::RateGroup;

        let hotel = HotelRates {
            hotel_id: "lp1".into(),
            groups: vec![RateGroup {
                rates: vec![
                    RoomRate { amount: 90.0, currency: Some("EUR".into()), ..Default::default() },
                    RoomRate { amount: 80.0, currency: Some("EUR".into()), ..Default::default() },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        let min = MinimumRate::from(&hotel);
        assert_eq!(min.currency.as_deref(), Some("EUR"));
        assert_eq!(min.minimum_rate.map(|r| r.amount), Some(80.0));

        let empty = MinimumRate::from(&HotelRates::default());
        assert!(empty.minimum_rate.is_none());
        assert!(empty.currency.is_none());
    }
}
