use serde::Serialize;

/// One priced, bookable option. Amounts within one response share a currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRate {
    pub rate_id: Option<String>,
    pub room_name: Option<String>,
    pub offer_id: Option<String>,
    pub board_name: Option<String>,
    pub amount: f64,
    pub currency: Option<String>,
}

/// A room type (or legacy room) and its rate options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateGroup {
    pub room_type_id: Option<String>,
    pub offer_id: Option<String>,
    pub rates: Vec<RoomRate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelRates {
    pub hotel_id: String,
    pub hotel_name: Option<String>,
    pub currency: Option<String>,
    pub groups: Vec<RateGroup>,
}

impl HotelRates {
    pub fn minimum_rate(&self) -> Option<&RoomRate> {
        minimum_rate(&self.groups)
    }
}

/// Cheapest rate across every group, compared by amount only.
///
/// Returns `None` when no group holds a rate. On ties the first one encountered wins.
pub fn minimum_rate(groups: &[RateGroup]) -> Option<&RoomRate> {
    let mut cheapest: Option<&RoomRate> = None;
    for rate in groups.iter().flat_map(|g| g.rates.iter()) {
        if cheapest.map_or(true, |c| rate.amount < c.amount) {
            cheapest = Some(rate);
        }
    }
    cheapest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(id: &str, amount: f64) -> RoomRate {
        RoomRate {
            rate_id: Some(id.to_string()),
            amount,
            currency: Some("USD".to_string()),
            ..Default::default()
        }
    }

    fn group(rates: Vec<RoomRate>) -> RateGroup {
        RateGroup {
            rates,
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_has_no_minimum() {
        assert_eq!(minimum_rate(&[]), None);
        assert_eq!(minimum_rate(&[group(vec![]), group(vec![])]), None);
    }

    #[test]
    fn first_of_equal_minimums_wins() {
        let groups = [group(vec![rate("a", 10.0), rate("b", 5.0), rate("c", 5.0)])];
        assert_eq!(
            minimum_rate(&groups).and_then(|r| r.rate_id.as_deref()),
            Some("b")
        );
    }

    #[test]
    fn searches_across_groups() {
        let groups = [
            group(vec![rate("a", 220.0), rate("b", 180.0)]),
            group(vec![]),
            group(vec![rate("c", 95.5), rate("d", 120.0)]),
            group(vec![rate("e", 95.5)]),
        ];
        let min = minimum_rate(&groups).unwrap();
        assert_eq!(min.rate_id.as_deref(), Some("c"));
        assert_eq!(min.amount, 95.5);
    }

    #[test]
    fn hotel_rates_delegates() {
        let hotel = HotelRates {
            hotel_id: "lp1".to_string(),
            groups: vec![group(vec![rate("x", 1.0)])],
            ..Default::default()
        };
        assert_eq!(hotel.minimum_rate().map(|r| r.amount), Some(1.0));
        assert_eq!(HotelRates::default().minimum_rate(), None);
    }
}
