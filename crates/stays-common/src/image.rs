//! Image URL resolution for hotel cards.
//!
//! An empty string means "no usable image"; the UI substitutes its own placeholder.

use crate::hotel::PhotoCandidates;

const ACCEPTED_PREFIXES: [&str; 3] = ["http://", "https://", "/"];

/// Return the trimmed URL when it is absolute (`http://`, `https://`) or root-relative,
/// otherwise the empty string.
pub fn safe_image_url(url: Option<&str>) -> String {
    let Some(url) = url else {
        return String::new();
    };
    let trimmed = url.trim();
    if ACCEPTED_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        trimmed.to_string()
    } else {
        String::new()
    }
}

/// First usable photo out of main photo, thumbnail, first and second gallery images.
pub fn best_image(photos: &PhotoCandidates) -> String {
    let candidates = [
        photos.main_photo.as_deref(),
        photos.thumbnail.as_deref(),
        photos.gallery.first().map(String::as_str),
        photos.gallery.get(1).map(String::as_str),
    ];

    candidates
        .into_iter()
        .map(safe_image_url)
        .find(|url| !url.is_empty())
        .unwrap_or_default()
}
