//! Delivery date resolution.

use regex::Captures;

use super::patterns::{DATE_DMY, DELIVERY_DEADLINE};
use crate::models::DeliveryDate;

/// Resolve the delivery deadline from document text.
///
/// A labeled "data limite de entrega" date wins. Otherwise the LAST
/// unlabeled DD/MM/YYYY token is taken: the final date mentioned in a
/// manifest is usually the deadline.
pub fn extract_delivery_date(text: &str) -> Option<DeliveryDate> {
    if let Some(caps) = DELIVERY_DEADLINE.captures(text) {
        if let Some(date) = date_from_caps(&caps) {
            return Some(date);
        }
    }

    DATE_DMY
        .captures_iter(text)
        .filter_map(|caps| date_from_caps(&caps))
        .last()
}

fn date_from_caps(caps: &Captures<'_>) -> Option<DeliveryDate> {
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    DeliveryDate::new(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labeled_deadline_wins_over_other_dates() {
        let text = "emitido em 01/01/2024, data limite de entrega: 15/03/2024, conferido 20/03/2024";
        let date = extract_delivery_date(text).unwrap();
        assert_eq!(date.to_string(), "2024-03-15");
    }

    #[test]
    fn last_unlabeled_date_wins_without_label() {
        let text = "emissão 01/02/2024 previsão 03/04/2024";
        let date = extract_delivery_date(text).unwrap();
        assert_eq!(date.to_string(), "2024-04-03");
    }

    #[test]
    fn out_of_range_tokens_are_not_dates() {
        assert!(extract_delivery_date("ref 45/13/2024").is_none());
        // the valid earlier date still wins over a trailing invalid one
        let date = extract_delivery_date("05/06/2024 depois 40/00/2024").unwrap();
        assert_eq!(date.to_string(), "2024-06-05");
    }

    #[test]
    fn no_date_yields_none() {
        assert!(extract_delivery_date("romaneio sem datas").is_none());
    }

    #[test]
    fn label_spacing_variants_match() {
        let date = extract_delivery_date("DATA LIMITE ENTREGA 02/05/2024").unwrap();
        assert_eq!(date.to_string(), "2024-05-02");
    }
}
