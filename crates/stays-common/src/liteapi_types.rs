//! Upstream wire types, one set per LiteAPI schema generation.
//!
//! Every field is optional and `null` is accepted anywhere a list is expected, so a
//! sparse upstream record still deserializes. Conversion into the canonical model
//! lives in [`crate::adapter`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The two overlapping hotel/rate schemas seen from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaGeneration {
    /// `hotelImages`, `starRating`, `countryCode`; rates as `rooms[].price`.
    Legacy,
    /// `main_photo`, `thumbnail`, `stars`, `country`; rates as `roomTypes[].rates[]`.
    Current,
}

const CURRENT_HOTEL_KEYS: [&str; 3] = ["stars", "main_photo", "thumbnail"];
const CURRENT_RATE_KEYS: [&str; 1] = ["roomTypes"];

fn has_any_key(value: &Value, keys: &[&str]) -> bool {
    value
        .as_object()
        .is_some_and(|obj| keys.iter().any(|k| obj.contains_key(*k)))
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids arrive as strings ("lp1897") but some feeds send numbers.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FacilityEntry {
    Named { name: Option<String> },
    Plain(String),
}

impl FacilityEntry {
    pub fn name(&self) -> Option<&str> {
        match self {
            FacilityEntry::Named { name } => name.as_deref(),
            FacilityEntry::Plain(name) => Some(name),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelImage {
    pub url: Option<String>,
    pub url_hd: Option<String>,
    pub caption: Option<String>,
    pub default_image: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentHotel {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub name: Option<String>,
    pub hotel_description: Option<String>,
    #[serde(rename = "main_photo")]
    pub main_photo: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub hotel_images: Vec<HotelImage>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// Detail records mix generations and may carry this next to `main_photo`.
    pub country_code: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub stars: Option<f64>,
    pub star_rating: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    #[serde(deserialize_with = "nullable")]
    pub facilities: Vec<FacilityEntry>,
    #[serde(deserialize_with = "nullable")]
    pub hotel_facilities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyHotel {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub name: Option<String>,
    pub hotel_description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub hotel_images: Vec<HotelImage>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub star_rating: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    #[serde(deserialize_with = "nullable")]
    pub facilities: Vec<FacilityEntry>,
}

/// An upstream hotel tagged with the schema generation it was written in.
#[derive(Debug, Clone)]
pub enum HotelRecord {
    Current(CurrentHotel),
    Legacy(LegacyHotel),
}

impl HotelRecord {
    /// Decide the generation from the record's keys, then deserialize with that schema.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if has_any_key(&value, &CURRENT_HOTEL_KEYS) {
            serde_json::from_value(value).map(HotelRecord::Current)
        } else {
            serde_json::from_value(value).map(HotelRecord::Legacy)
        }
    }

    pub fn generation(&self) -> SchemaGeneration {
        match self {
            HotelRecord::Current(_) => SchemaGeneration::Current,
            HotelRecord::Legacy(_) => SchemaGeneration::Legacy,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Money {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RetailRate {
    #[serde(deserialize_with = "nullable")]
    pub total: Vec<Money>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentRate {
    pub rate_id: Option<String>,
    pub name: Option<String>,
    pub board_name: Option<String>,
    pub retail_rate: Option<RetailRate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentRoomType {
    pub room_type_id: Option<String>,
    pub offer_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub rates: Vec<CurrentRate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentHotelRates {
    #[serde(deserialize_with = "lenient_id")]
    pub hotel_id: String,
    #[serde(deserialize_with = "nullable")]
    pub room_types: Vec<CurrentRoomType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyRoomRate {
    pub room_id: Option<String>,
    pub room_name: Option<String>,
    pub meal_plan: Option<String>,
    pub offer_id: Option<String>,
    pub price: Option<Money>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyHotelRate {
    #[serde(deserialize_with = "lenient_id")]
    pub hotel_id: String,
    pub hotel_name: Option<String>,
    pub currency: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub rooms: Vec<LegacyRoomRate>,
}

#[derive(Debug, Clone)]
pub enum RateRecord {
    Current(CurrentHotelRates),
    Legacy(LegacyHotelRate),
}

impl RateRecord {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if has_any_key(&value, &["rooms"]) && !has_any_key(&value, &CURRENT_RATE_KEYS) {
            serde_json::from_value(value).map(RateRecord::Legacy)
        } else {
            serde_json::from_value(value).map(RateRecord::Current)
        }
    }

    pub fn generation(&self) -> SchemaGeneration {
        match self {
            RateRecord::Current(_) => SchemaGeneration::Current,
            RateRecord::Legacy(_) => SchemaGeneration::Legacy,
        }
    }
}
