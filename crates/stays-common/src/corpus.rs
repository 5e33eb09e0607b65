use crate::hotel::RawHotel;

/// Lower-cased search text for keyword rules: facility names joined by spaces,
/// a space, then the description.
///
/// Matching is plain substring search, so "non-halal" matches "halal".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus(String);

impl Corpus {
    pub fn new<'a, I>(facilities: I, description: Option<&str>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let facilities = facilities
            .into_iter()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        let description = description.map(str::to_lowercase).unwrap_or_default();
        Self(format!("{facilities} {description}"))
    }

    pub fn of(hotel: &RawHotel) -> Self {
        Self::new(
            hotel.facilities.iter().map(String::as_str),
            hotel.description.as_deref(),
        )
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(n))
    }
}
