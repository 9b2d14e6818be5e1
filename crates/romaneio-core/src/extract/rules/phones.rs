//! Phone number extraction and canonical normalization.

use super::patterns::PHONE;

/// Country calling code expected on every dispatched number.
const COUNTRY_PREFIX: &str = "55";

/// Extract candidate phone numbers from concatenated document text.
///
/// Candidates are reduced to digits and kept only when 10 to 12 digits
/// long. Duplicates collapse onto their first occurrence, so the result
/// is in first-occurrence order.
pub fn extract_phones(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in PHONE.find_iter(text) {
        let digits = digits_only(m.as_str());
        if (10..=12).contains(&digits.len()) && !found.contains(&digits) {
            found.push(digits);
        }
    }
    found
}

/// Strip every non-digit character.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Canonical dispatch form: digits only, with the country prefix.
///
/// This form feeds both the blocklist comparison and the sink URL.
pub fn normalize_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.starts_with(COUNTRY_PREFIX) {
        digits
    } else {
        format!("{COUNTRY_PREFIX}{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_formatted_and_bare_numbers() {
        let text = "Contato: (11) 94550-9645 ou 1136518801";
        assert_eq!(extract_phones(text), vec!["11945509645", "1136518801"]);
    }

    #[test]
    fn rejects_digit_lengths_outside_bounds() {
        // 8 digits cannot satisfy the phone shape at all
        assert!(extract_phones("ramal 4567-8901").is_empty());
        for phone in extract_phones("(11) 94550-9645 555 (21) 3333-4444") {
            assert!((10..=12).contains(&phone.len()));
        }
    }

    #[test]
    fn deduplicates_after_normalization_keeping_first_occurrence() {
        let text = "(11) 94550-9645 e depois 11 94550 9645 e (21) 4002-8922";
        assert_eq!(extract_phones(text), vec!["11945509645", "2140028922"]);
    }

    #[test]
    fn normalize_prepends_country_prefix() {
        assert_eq!(normalize_phone("(11) 94550-9645"), "5511945509645");
    }

    #[test]
    fn normalize_keeps_existing_prefix() {
        assert_eq!(normalize_phone("5511945509645"), "5511945509645");
    }
}
