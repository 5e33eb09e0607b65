//! Halal relevance score used to rank search results.

use std::cmp::Reverse;

use crate::corpus::Corpus;
use crate::halal::HalalFeature;
use crate::hotel::RawHotel;

pub const MAX_SCORE: u8 = 100;
const BONUS: u8 = 10;

const BASE_RULES: [(HalalFeature, u8); 3] = [
    (HalalFeature::Prayer, 40),
    (HalalFeature::HalalFood, 40),
    (HalalFeature::AlcoholFree, 20),
];

const MOSQUE: &[&str] = &["mosque"];

/// Score a corpus in `0..=100`.
///
/// Base rules add 40/40/20 and sum to at most 100. Each bonus (women-only facilities,
/// a mosque mention) adds 10 but is capped at 100.
pub fn score_corpus(corpus: &Corpus) -> u8 {
    let mut score: u8 = BASE_RULES
        .iter()
        .filter(|(feature, _)| corpus.contains_any(feature.keywords()))
        .map(|(_, points)| *points)
        .sum();

    for keywords in [HalalFeature::WomenOnly.keywords(), MOSQUE] {
        if corpus.contains_any(keywords) {
            score = MAX_SCORE.min(score + BONUS);
        }
    }
    score
}

pub fn halal_score(hotel: &RawHotel) -> u8 {
    score_corpus(&Corpus::of(hotel))
}

/// Sort descending by halal score. Hotels with equal scores keep their input order.
pub fn sort_by_halal_score(mut hotels: Vec<RawHotel>) -> Vec<RawHotel> {
    hotels.sort_by_cached_key(|h| Reverse(halal_score(h)));
    hotels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(id: &str, facilities: &[&str], description: &str) -> RawHotel {
        RawHotel {
            id: id.to_string(),
            facilities: facilities.iter().map(|s| s.to_string()).collect(),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn prayer_room_and_halal_restaurant_score_eighty() {
        assert_eq!(halal_score(&hotel("a", &["Prayer Room", "Halal Restaurant"], "")), 80);
    }

    #[test]
    fn no_keywords_score_zero() {
        assert_eq!(halal_score(&hotel("a", &[], "Modern rooms near the beach")), 0);
    }

    #[test]
    fn bonuses_apply_without_base_rules() {
        assert_eq!(halal_score(&hotel("a", &[], "Women-only spa and mosque nearby")), 20);
    }

    #[test]
    fn bonuses_are_capped() {
        let h = hotel(
            "a",
            &["Prayer room", "Halal buffet"],
            "No alcohol served. Women only pool, mosque nearby.",
        );
        assert_eq!(halal_score(&h), 100);

        let h = hotel("a", &["Prayer room", "Halal buffet"], "women only floor");
        assert_eq!(halal_score(&h), 90);
    }

    #[test]
    fn base_rules_fire_once_each() {
        let h = hotel("a", &["Halal food", "Halal kitchen"], "halal halal halal");
        assert_eq!(halal_score(&h), 40);
    }

    #[test]
    fn score_is_bounded_and_idempotent() {
        let samples = [
            hotel("a", &[], ""),
            hotel("b", &["prayer", "halal", "alcohol-free"], "women-only mosque"),
            hotel("c", &["Muslim friendly"], "family"),
        ];
        for h in &samples {
            let s = halal_score(h);
            assert!(s <= MAX_SCORE);
            assert_eq!(s, halal_score(h));
        }
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let hotels = vec![
            hotel("plain-1", &[], "beach"),
            hotel("halal", &["Halal food"], ""),
            hotel("plain-2", &[], "city"),
            hotel("full", &["Prayer room", "Halal food"], ""),
            hotel("halal-2", &[], "halal breakfast"),
        ];
        let ids: Vec<String> = sort_by_halal_score(hotels).into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec!["full", "halal", "halal-2", "plain-1", "plain-2"]);
    }
}
