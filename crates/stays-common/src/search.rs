//! Outgoing rates requests built from loosely specified search input.

use chrono::{Days, NaiveDate};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_NATIONALITY: &str = "US";
pub const DEFAULT_ADULTS: u32 = 2;
pub const DEFAULT_ROOMS: u32 = 1;

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date. Unpadded or otherwise loose forms are rejected.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    (format_date(date) == s).then_some(date)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub rooms: u32,
    pub adults: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
}

/// Body for the upstream `/hotels/rates` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesRequest {
    pub hotel_ids: Vec<String>,
    pub checkin: String,
    pub checkout: String,
    pub currency: String,
    pub guest_nationality: String,
    pub occupancies: Vec<Occupancy>,
}

/// Search input where every field may be left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub rooms: Option<u32>,
    pub currency: Option<String>,
    pub guest_nationality: Option<String>,
}

impl SearchParams {
    /// Check-in and check-out after defaulting: check-in `today`, check-out the
    /// night after check-in. An explicit check-out is returned as given.
    pub fn stay(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let checkin = self.checkin.unwrap_or(today);
        let checkout = self
            .checkout
            .or_else(|| checkin.checked_add_days(Days::new(1)))
            .unwrap_or(checkin);
        (checkin, checkout)
    }

    /// Fill the gaps: dates as in [`SearchParams::stay`], USD, US nationality,
    /// two adults in one room.
    pub fn into_rates_request(self, hotel_ids: Vec<String>, today: NaiveDate) -> RatesRequest {
        let (checkin, checkout) = self.stay(today);

        RatesRequest {
            hotel_ids,
            checkin: format_date(checkin),
            checkout: format_date(checkout),
            currency: self
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            guest_nationality: self
                .guest_nationality
                .unwrap_or_else(|| DEFAULT_NATIONALITY.to_string()),
            occupancies: vec![Occupancy {
                rooms: self.rooms.filter(|&r| r > 0).unwrap_or(DEFAULT_ROOMS),
                adults: self.guests.filter(|&g| g > 0).unwrap_or(DEFAULT_ADULTS),
                children: Vec::new(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_date_is_strict() {
        assert_eq!(parse_date("2024-12-20"), Some(day(2024, 12, 20)));
        assert_eq!(parse_date("2024-2-5"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("20-12-2024"), None);
        assert_eq!(parse_date(" 2024-12-20"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn defaults_fill_every_gap() {
        let req = SearchParams::default().into_rates_request(vec!["lp1".into()], day(2024, 12, 31));
        assert_eq!(req.checkin, "2024-12-31");
        assert_eq!(req.checkout, "2025-01-01");
        assert_eq!(req.currency, "USD");
        assert_eq!(req.guest_nationality, "US");
        assert_eq!(
            req.occupancies,
            vec![Occupancy { rooms: 1, adults: 2, children: vec![] }]
        );
    }

    #[test]
    fn checkout_follows_explicit_checkin() {
        let params = SearchParams {
            checkin: Some(day(2025, 3, 10)),
            guests: Some(3),
            rooms: Some(2),
            currency: Some("AED".into()),
            ..Default::default()
        };
        let req = params.into_rates_request(vec![], day(2025, 1, 1));
        assert_eq!(req.checkin, "2025-03-10");
        assert_eq!(req.checkout, "2025-03-11");
        assert_eq!(req.currency, "AED");
        assert_eq!(req.occupancies[0].adults, 3);
        assert_eq!(req.occupancies[0].rooms, 2);
    }

    #[test]
    fn stay_keeps_explicit_checkout() {
        let params = SearchParams {
            checkout: Some(day(2025, 3, 1)),
            ..Default::default()
        };
        assert_eq!(params.stay(day(2025, 3, 10)), (day(2025, 3, 10), day(2025, 3, 1)));
        assert_eq!(
            SearchParams::default().stay(day(2025, 3, 10)),
            (day(2025, 3, 10), day(2025, 3, 11))
        );
    }

    #[test]
    fn serializes_in_upstream_shape() {
        let req = SearchParams::default().into_rates_request(vec!["a".into(), "b".into()], day(2024, 6, 1));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "hotelIds": ["a", "b"],
                "checkin": "2024-06-01",
                "checkout": "2024-06-02",
                "currency": "USD",
                "guestNationality": "US",
                "occupancies": [{"rooms": 1, "adults": 2}]
            })
        );
    }
}
