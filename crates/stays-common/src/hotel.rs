use serde::Serialize;

use crate::badges::{self, Badge};
use crate::image::best_image;
use crate::rates::RoomRate;
use crate::text::clean_description;

pub const PRICE_LABEL: &str = "per night";
const DEFAULT_TITLE: &str = "Hotel";
const DEFAULT_LOCATION: &str = "Location not specified";
const DEFAULT_DESCRIPTION: &str = "Comfortable accommodation with modern amenities";
const DEFAULT_STARS: f64 = 3.0;
const FEATURED_MIN_STARS: f64 = 4.0;

/// Photo fields of an upstream hotel, in the order the image selector tries them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoCandidates {
    pub main_photo: Option<String>,
    pub thumbnail: Option<String>,
    /// Gallery image URLs in upstream order.
    pub gallery: Vec<String>,
}

/// Canonical hotel record, independent of which upstream schema generation produced it.
///
/// Built by the adapters in [`crate::adapter`]; lives for a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHotel {
    pub id: String,
    pub name: Option<String>,
    /// Free text, may contain HTML.
    pub description: Option<String>,
    /// Facility names as free text.
    pub facilities: Vec<String>,
    pub photos: PhotoCandidates,
    pub city: Option<String>,
    pub country: Option<String>,
    /// ISO code, kept apart from `country` because only destinations fall back to it.
    pub country_code: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Guest rating on a 0-10 scale.
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub stars: Option<f64>,
}

/// Hotel card shape consumed by the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayHotel {
    pub id: String,
    pub title: String,
    pub location: String,
    pub rating: f64,
    pub reviews: u64,
    pub description: String,
    /// Resolved image URL, or empty when the hotel has no usable photo.
    pub image: String,
    pub badges: Vec<Badge>,
    pub price: f64,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub image: String,
    pub featured: bool,
}

impl RawHotel {
    /// "City, Country" when both are known, otherwise the best single field available.
    pub fn location(&self) -> String {
        match (non_blank(&self.city), non_blank(&self.country)) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(city), None) => city.to_string(),
            _ => non_blank(&self.address)
                .unwrap_or(DEFAULT_LOCATION)
                .to_string(),
        }
    }
}

pub fn to_display(hotel: &RawHotel) -> DisplayHotel {
    DisplayHotel {
        id: hotel.id.clone(),
        title: non_blank(&hotel.name).unwrap_or(DEFAULT_TITLE).to_string(),
        location: hotel.location(),
        rating: hotel.rating.unwrap_or(0.0),
        reviews: hotel.review_count.unwrap_or(0),
        description: clean_description(hotel.description.as_deref())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        image: best_image(&hotel.photos),
        badges: badges::badges_for(hotel),
        price: 0.0,
        price_label: PRICE_LABEL.to_string(),
    }
}

/// Attach the price of `rate` to a display hotel. `None` leaves the price at zero.
pub fn with_rate(mut display: DisplayHotel, rate: Option<&RoomRate>) -> DisplayHotel {
    if let Some(rate) = rate {
        display.price = rate.amount;
    }
    display
}

pub fn to_destination(hotel: &RawHotel) -> Destination {
    let stars = hotel.stars.filter(|s| *s > 0.0).unwrap_or(DEFAULT_STARS);
    Destination {
        id: hotel.id.clone(),
        name: non_blank(&hotel.city)
            .or_else(|| non_blank(&hotel.name))
            .unwrap_or(DEFAULT_TITLE)
            .to_string(),
        country: non_blank(&hotel.country_code)
            .or_else(|| non_blank(&hotel.country))
            .unwrap_or("Unknown")
            .to_string(),
        image: best_image(&hotel.photos),
        featured: stars >= FEATURED_MIN_STARS,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
