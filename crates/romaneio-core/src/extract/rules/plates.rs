//! Vehicle plate extraction.

use super::patterns::PLATE;

/// Extract plate candidates in first-occurrence order.
///
/// Both the legacy (AAA-9999) and Mercosul (AAA9A99) formats are
/// recognized, case-insensitively, and normalized to uppercase
/// alphanumeric. Repeats are kept: a manifest often prints the same
/// plate on every page, and the caller decides the distinct-plate
/// policy.
pub fn extract_plates(text: &str) -> Vec<String> {
    PLATE
        .find_iter(text)
        .map(|m| normalize_plate(m.as_str()))
        .collect()
}

/// Strip separators and uppercase.
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_uppercase()
}
