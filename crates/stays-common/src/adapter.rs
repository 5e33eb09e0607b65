//! Adapters from upstream response bodies to the canonical hotel and rate model.
//!
//! Each schema generation has its own `From` impl; callers only ever see
//! [`RawHotel`] and [`HotelRates`]. Records that fail to deserialize are skipped
//! with a warning rather than failing the whole response.

use serde_json::Value;
use tracing::{debug, warn};

use crate::hotel::{PhotoCandidates, RawHotel};
use crate::liteapi_types::{
    CurrentHotel, CurrentHotelRates, FacilityEntry, HotelImage, HotelRecord, LegacyHotel,
    LegacyHotelRate, RateRecord,
};
use crate::rates::{HotelRates, RateGroup, RoomRate};

impl From<CurrentHotel> for RawHotel {
    fn from(h: CurrentHotel) -> Self {
        let mut facilities = facility_names(h.facilities);
        facilities.extend(h.hotel_facilities);
        RawHotel {
            id: h.id,
            name: h.name,
            description: h.hotel_description,
            facilities,
            photos: PhotoCandidates {
                main_photo: h.main_photo,
                thumbnail: h.thumbnail,
                gallery: gallery(h.hotel_images),
            },
            city: h.city,
            country: h.country,
            country_code: h.country_code,
            address: h.address,
            latitude: h.latitude,
            longitude: h.longitude,
            rating: h.rating,
            review_count: h.review_count,
            stars: h.stars.or(h.star_rating),
        }
    }
}

impl From<LegacyHotel> for RawHotel {
    fn from(h: LegacyHotel) -> Self {
        RawHotel {
            id: h.id,
            name: h.name,
            description: h.hotel_description,
            facilities: facility_names(h.facilities),
            photos: PhotoCandidates {
                main_photo: None,
                thumbnail: None,
                gallery: gallery(h.hotel_images),
            },
            city: h.city,
            country: h.country,
            country_code: h.country_code,
            address: h.address,
            latitude: h.latitude,
            longitude: h.longitude,
            rating: h.rating,
            review_count: h.review_count,
            stars: h.star_rating,
        }
    }
}

impl From<HotelRecord> for RawHotel {
    fn from(record: HotelRecord) -> Self {
        match record {
            HotelRecord::Current(h) => h.into(),
            HotelRecord::Legacy(h) => h.into(),
        }
    }
}

impl From<CurrentHotelRates> for HotelRates {
    fn from(r: CurrentHotelRates) -> Self {
        let groups: Vec<RateGroup> = r
            .room_types
            .into_iter()
            .map(|room_type| RateGroup {
                rates: room_type
                    .rates
                    .into_iter()
                    .map(|rate| {
                        let total = rate
                            .retail_rate
                            .and_then(|retail| retail.total.into_iter().next())
                            .unwrap_or_default();
                        RoomRate {
                            rate_id: rate.rate_id,
                            room_name: rate.name,
                            offer_id: room_type.offer_id.clone(),
                            board_name: rate.board_name,
                            // A rate with no retail total counts as free.
                            amount: total.amount.unwrap_or(0.0),
                            currency: total.currency,
                        }
                    })
                    .collect(),
                room_type_id: room_type.room_type_id,
                offer_id: room_type.offer_id,
            })
            .collect();

        let currency = groups
            .iter()
            .flat_map(|g| g.rates.iter())
            .find_map(|rate| rate.currency.clone());

        HotelRates {
            hotel_id: r.hotel_id,
            hotel_name: None,
            currency,
            groups,
        }
    }
}

impl From<LegacyHotelRate> for HotelRates {
    fn from(r: LegacyHotelRate) -> Self {
        let currency = r.currency;
        let groups = r
            .rooms
            .into_iter()
            .map(|room| {
                // Legacy rooms without a price are not bookable options.
                let rates = room
                    .price
                    .and_then(|price| {
                        let amount = price.amount?;
                        Some(RoomRate {
                            rate_id: room.room_id.clone(),
                            room_name: room.room_name,
                            offer_id: room.offer_id.clone(),
                            board_name: room.meal_plan,
                            amount,
                            currency: price.currency.or_else(|| currency.clone()),
                        })
                    })
                    .into_iter()
                    .collect();
                RateGroup {
                    room_type_id: room.room_id,
                    offer_id: room.offer_id,
                    rates,
                }
            })
            .collect();

        HotelRates {
            hotel_id: r.hotel_id,
            hotel_name: r.hotel_name,
            currency,
            groups,
        }
    }
}

impl From<RateRecord> for HotelRates {
    fn from(record: RateRecord) -> Self {
        match record {
            RateRecord::Current(r) => r.into(),
            RateRecord::Legacy(r) => r.into(),
        }
    }
}

/// Hotels from a list response: `{"data": [...]}` or a bare array.
pub fn hotels_from_envelope(body: &Value) -> Vec<RawHotel> {
    records(body)
        .iter()
        .filter_map(|value| {
            HotelRecord::from_value(value.clone())
                .inspect(|r| debug!(generation = ?r.generation(), "upstream hotel"))
                .inspect_err(|e| warn!(error = %e, "skipping malformed upstream hotel"))
                .ok()
        })
        .map(RawHotel::from)
        .collect()
}

/// Hotel from a detail response: `{"data": {...}}` or a bare object.
pub fn hotel_from_envelope(body: &Value) -> Option<RawHotel> {
    let value = body.get("data").unwrap_or(body);
    if !value.is_object() {
        return None;
    }
    HotelRecord::from_value(value.clone())
        .inspect(|r| debug!(generation = ?r.generation(), "upstream hotel detail"))
        .inspect_err(|e| warn!(error = %e, "malformed upstream hotel detail"))
        .ok()
        .map(RawHotel::from)
}

/// Rates from a rates response. `data` may be the list itself or wrap another
/// `{"data": [...]}`.
pub fn rates_from_envelope(body: &Value) -> Vec<HotelRates> {
    records(body)
        .iter()
        .filter_map(|value| {
            RateRecord::from_value(value.clone())
                .inspect(|r| debug!(generation = ?r.generation(), "upstream rate"))
                .inspect_err(|e| warn!(error = %e, "skipping malformed upstream rate"))
                .ok()
        })
        .map(HotelRates::from)
        .collect()
}

fn records(body: &Value) -> &[Value] {
    let mut current = body;
    // Unwrap at most two `data` layers.
    for _ in 0..2 {
        match current {
            Value::Array(items) => return items,
            Value::Object(obj) => match obj.get("data") {
                Some(inner) => current = inner,
                None => return &[],
            },
            _ => return &[],
        }
    }
    current.as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn facility_names(entries: Vec<FacilityEntry>) -> Vec<String> {
    entries
        .iter()
        .filter_map(FacilityEntry::name)
        .map(str::to_string)
        .collect()
}

fn gallery(images: Vec<HotelImage>) -> Vec<String> {
    images.into_iter().filter_map(|img| img.url).collect()
}
