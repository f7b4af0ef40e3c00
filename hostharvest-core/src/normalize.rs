//! Whitespace normalization shared by names and host candidates.

/// Collapses every run of whitespace to a single space and trims both ends.
///
/// Returns an empty string when the input holds nothing but whitespace.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
