use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip HTML tags from an upstream description and collapse whitespace.
///
/// Returns `None` when nothing readable is left, so callers can pick their own default.
/// Entities such as `&amp;` are left as they are.
pub fn clean_description(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let without_tags = TAG_RE.replace_all(raw, "");
    let collapsed = WS_RE.replace_all(&without_tags, " ");
    let trimmed = collapsed.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
