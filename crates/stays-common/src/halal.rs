//! Keyword filters for halal-friendly properties.

use crate::corpus::Corpus;
use crate::hotel::RawHotel;

/// Phrases that mark a facility or description as halal-friendly.
pub const HALAL_FACILITY_KEYWORDS: [&str; 19] = [
    "prayer room",
    "prayer facility",
    "muslim prayer",
    "halal restaurant",
    "halal food",
    "halal dining",
    "halal kitchen",
    "no alcohol",
    "alcohol-free",
    "islamic",
    "muslim-friendly",
    "muslim friendly",
    "women-only pool",
    "women-only spa",
    "women only",
    "separate swimming",
    "qibla",
    "mosque nearby",
    "halal certified",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalalFeature {
    Prayer,
    HalalFood,
    AlcoholFree,
    WomenOnly,
}

impl HalalFeature {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            HalalFeature::Prayer => &["prayer"],
            HalalFeature::HalalFood => &["halal"],
            HalalFeature::AlcoholFree => &["no alcohol", "alcohol-free"],
            HalalFeature::WomenOnly => &["women-only", "women only"],
        }
    }
}

/// True when any single facility name, or the description, contains a halal keyword.
pub fn is_halal_friendly(hotel: &RawHotel) -> bool {
    let description = hotel
        .description
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let facilities: Vec<String> = hotel.facilities.iter().map(|f| f.to_lowercase()).collect();

    HALAL_FACILITY_KEYWORDS.iter().any(|keyword| {
        facilities.iter().any(|f| f.contains(keyword)) || description.contains(keyword)
    })
}

pub fn filter_halal(hotels: Vec<RawHotel>) -> Vec<RawHotel> {
    hotels.into_iter().filter(is_halal_friendly).collect()
}

/// Facility names that match a halal keyword, in upstream order.
pub fn halal_facilities(hotel: &RawHotel) -> Vec<&str> {
    hotel
        .facilities
        .iter()
        .filter(|f| {
            let lower = f.to_lowercase();
            HALAL_FACILITY_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(String::as_str)
        .collect()
}

pub fn has_feature(hotel: &RawHotel, feature: HalalFeature) -> bool {
    Corpus::of(hotel).contains_any(feature.keywords())
}
