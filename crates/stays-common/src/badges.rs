use std::fmt;

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::hotel::RawHotel;

/// Halal-relevance tag shown on hotel cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    Halal,
    PrayerRoom,
    FamilyFriendly,
    NoAlcohol,
    WomenOnly,
}

impl Badge {
    pub fn as_str(self) -> &'static str {
        match self {
            Badge::Halal => "halal",
            Badge::PrayerRoom => "prayer-room",
            Badge::FamilyFriendly => "family-friendly",
            Badge::NoAlcohol => "no-alcohol",
            Badge::WomenOnly => "women-only",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Evaluation order is also output order.
const RULES: [(Badge, &[&str]); 5] = [
    (Badge::PrayerRoom, &["prayer", "muslim"]),
    (Badge::Halal, &["halal"]),
    (Badge::FamilyFriendly, &["family"]),
    (Badge::NoAlcohol, &["alcohol-free", "no alcohol"]),
    (Badge::WomenOnly, &["women-only", "women only"]),
];

/// Badges whose keywords occur in `corpus`. Never empty: with no signal at all the
/// hotel is tagged [`Badge::Halal`].
pub fn classify(corpus: &Corpus) -> Vec<Badge> {
    let badges: Vec<Badge> = RULES
        .iter()
        .filter(|(_, keywords)| corpus.contains_any(keywords))
        .map(|(badge, _)| *badge)
        .collect();

    if badges.is_empty() {
        vec![Badge::Halal]
    } else {
        badges
    }
}

pub fn badges_for(hotel: &RawHotel) -> Vec<Badge> {
    classify(&Corpus::of(hotel))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Badge; 5] = [
        Badge::Halal,
        Badge::PrayerRoom,
        Badge::FamilyFriendly,
        Badge::NoAlcohol,
        Badge::WomenOnly,
    ];

    fn corpus(facilities: &[&str], description: &str) -> Corpus {
        Corpus::new(facilities.iter().copied(), Some(description))
    }

    #[test]
    fn prayer_room_and_halal_restaurant() {
        let badges = classify(&corpus(&["Prayer Room", "Halal Restaurant"], ""));
        assert_eq!(badges, vec![Badge::PrayerRoom, Badge::Halal]);
    }

    #[test]
    fn no_signal_defaults_to_halal() {
        let badges = classify(&corpus(&[], "Modern rooms near the beach"));
        assert_eq!(badges, vec![Badge::Halal]);
    }

    #[test]
    fn muslim_maps_to_prayer_room() {
        assert_eq!(
            classify(&corpus(&["Muslim-friendly amenities"], "")),
            vec![Badge::PrayerRoom]
        );
    }

    #[test]
    fn every_badge_can_fire() {
        let badges = classify(&corpus(
            &["Prayer mats", "Halal kitchen", "Family suites"],
            "Alcohol-free property with a women only pool",
        ));
        assert_eq!(
            badges,
            vec![
                Badge::PrayerRoom,
                Badge::Halal,
                Badge::FamilyFriendly,
                Badge::NoAlcohol,
                Badge::WomenOnly
            ]
        );
    }

    #[test]
    fn substring_matching_is_naive() {
        assert_eq!(
            classify(&corpus(&[], "Non-halal restaurant on site")),
            vec![Badge::Halal]
        );
        assert_eq!(
            classify(&corpus(&["Newfamily lounge"], "")),
            vec![Badge::FamilyFriendly]
        );
    }

    #[test]
    fn classification_is_idempotent_and_within_vocabulary() {
        let c = corpus(&["Family room", "No alcohol"], "Women-only spa");
        let first = classify(&c);
        assert_eq!(first, classify(&c));
        assert!(!first.is_empty());
        assert!(first.iter().all(|b| ALL.contains(b)));
    }

    #[test]
    fn display_matches_serde_name() {
        for badge in ALL {
            let json = serde_json::to_value(badge).unwrap();
            assert_eq!(json, badge.to_string());
        }
    }
}
