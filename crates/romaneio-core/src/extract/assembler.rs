//! Combines rule and positional extraction into per-plate records.

use tracing::{debug, warn};

use crate::blocklist::{BlocklistFilter, FilterOutcome};
use crate::document::Document;
use crate::models::{ExtractedRecord, RomaneioConfig};

use super::positional::{resolve_label_value, LabelRule};
use super::rules::{extract_delivery_date, extract_phones, extract_plates, DestinationResolver};

/// Everything extraction produced for one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtraction {
    /// One record per distinct plate, in order of first appearance.
    pub records: Vec<ExtractedRecord>,
    /// Phones that were matched but are blocklisted.
    pub blocked: Vec<String>,
    /// Human-readable notes about fields that could not be resolved.
    pub warnings: Vec<String>,
}

/// Runs the full extraction pipeline over a parsed document.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    blocklist: BlocklistFilter,
    destinations: DestinationResolver,
    model_rule: LabelRule,
    origin_rule: LabelRule,
}

impl RecordAssembler {
    pub fn new(config: &RomaneioConfig) -> Self {
        Self {
            blocklist: BlocklistFilter::new(&config.blocklist.numbers),
            destinations: DestinationResolver::new(&config.extraction.destination_cities),
            model_rule: LabelRule::model(),
            origin_rule: LabelRule::origin_city(),
        }
    }

    /// Extract all fields from one document and fan them out into one
    /// record per distinct plate. All records of a document share the
    /// same phones, model, cities and delivery date.
    pub fn assemble(&self, doc: &Document) -> DocumentExtraction {
        let mut extraction = DocumentExtraction::default();

        let phones = extract_phones(&doc.text);
        let FilterOutcome { allowed, blocked } = self.blocklist.filter(&phones);
        extraction.blocked = blocked;
        if allowed.is_empty() {
            extraction
                .warnings
                .push(format!("{}: no dispatchable phone found", doc.pdf_name));
        }

        let plates = extract_plates(&doc.text);
        let mut distinct: Vec<String> = Vec::new();
        for plate in &plates {
            if !distinct.contains(plate) {
                distinct.push(plate.clone());
            }
        }
        if distinct.is_empty() {
            warn!(pdf = %doc.pdf_name, "no plate found, nothing to record");
            extraction
                .warnings
                .push(format!("{}: no plate found", doc.pdf_name));
            return extraction;
        }

        let delivery_date = extract_delivery_date(&doc.text);
        let destination = self.destinations.resolve(&doc.text);
        let (model, origin) = if doc.has_positions() {
            (
                resolve_label_value(&doc.tokens, &self.model_rule),
                resolve_label_value(&doc.tokens, &self.origin_rule),
            )
        } else {
            debug!(pdf = %doc.pdf_name, "no token positions, skipping labeled fields");
            (None, None)
        };

        for plate in distinct {
            extraction.records.push(ExtractedRecord {
                plate,
                model: model.clone(),
                origin: origin.clone(),
                destination: destination.clone(),
                delivery_date,
                phones: allowed.clone(),
                pdf_name: doc.pdf_name.clone(),
            });
        }
        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Token;
    use pretty_assertions::assert_eq;

    fn assembler() -> RecordAssembler {
        RecordAssembler::new(&RomaneioConfig::default())
    }

    fn doc(text: &str) -> Document {
        Document {
            pdf_name: "romaneio.pdf".to_string(),
            tokens: Vec::new(),
            text: text.to_string(),
        }
    }

    #[test]
    fn one_record_per_distinct_plate_sharing_fields() {
        let extraction = assembler().assemble(&doc(
            "Veículos ABC-1234 e XYZ1A23, repetido ABC1234. \
             Contato (11) 98765-4321. Destino CAMPINAS - SP. \
             Data limite de entrega 05/06/2024",
        ));
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[0].plate, "ABC1234");
        assert_eq!(extraction.records[1].plate, "XYZ1A23");
        for record in &extraction.records {
            assert_eq!(record.phones, vec!["11987654321"]);
            assert_eq!(record.destination.as_deref(), Some("CAMPINAS - SP"));
            assert_eq!(record.delivery_date.map(|d| d.to_string()).as_deref(), Some("2024-06-05"));
        }
    }

    #[test]
    fn no_plate_means_no_records_and_a_warning() {
        let extraction = assembler().assemble(&doc("Contato (11) 98765-4321"));
        assert!(extraction.records.is_empty());
        assert!(extraction.warnings.iter().any(|w| w.contains("no plate")));
    }

    #[test]
    fn blocked_phones_are_reported_not_recorded() {
        let extraction = assembler().assemble(&doc(
            "Placa ABC-1234, contatos (11) 94550-9645 e (21) 4002-8922",
        ));
        assert_eq!(extraction.blocked, vec!["11945509645"]);
        assert_eq!(extraction.records[0].phones, vec!["2140028922"]);
    }

    #[test]
    fn positional_fields_resolve_when_tokens_carry_coordinates() {
        let mut document = doc("Placa ABC1234 MODELO GOL CIDADE OSASCO");
        document.tokens = vec![
            Token {
                text: "MODELO".to_string(),
                x: 10.0,
                y: 50.0,
                page: 1,
            },
            Token {
                text: "GOL".to_string(),
                x: 40.0,
                y: 50.0,
                page: 1,
            },
            Token {
                text: "CIDADE".to_string(),
                x: 10.0,
                y: 70.0,
                page: 1,
            },
            Token {
                text: "OSASCO".to_string(),
                x: 40.0,
                y: 70.0,
                page: 1,
            },
        ];
        let extraction = assembler().assemble(&document);
        assert_eq!(extraction.records[0].model.as_deref(), Some("GOL"));
        assert_eq!(extraction.records[0].origin.as_deref(), Some("OSASCO"));
    }
}
