//! Label-anchored positional field resolution.
//!
//! Token order out of the tokenizer adapter is not reading order, so a
//! field value is found by locating its printed label and scanning the
//! tokens that share the label's visual row, to its right.

use std::cmp::Ordering;

use regex::Regex;

use crate::document::Token;

use super::rules::patterns::{CITY_EXCLUDE, MODEL_EXCLUDE};

/// Vertical distance under which two tokens count as the same printed row.
pub const ROW_TOLERANCE: f32 = 2.0;

/// How one labeled field is resolved.
#[derive(Debug, Clone)]
pub struct LabelRule {
    /// Exact text of the label token (case-sensitive).
    pub label: String,
    /// Candidate values must be strictly longer than this.
    pub min_len: usize,
    /// Candidates matching this pattern are never field values.
    pub exclude: Regex,
}

impl LabelRule {
    pub fn new(label: impl Into<String>, min_len: usize, exclude: Regex) -> Self {
        Self {
            label: label.into(),
            min_len,
            exclude,
        }
    }

    /// Vehicle model printed next to the "MODELO" label.
    pub fn model() -> Self {
        Self::new("MODELO", 1, MODEL_EXCLUDE.clone())
    }

    /// Origin city printed next to the "CIDADE" label.
    pub fn origin_city() -> Self {
        Self::new("CIDADE", 2, CITY_EXCLUDE.clone())
    }
}

/// Resolve the value token for a labeled field.
///
/// Candidates sit on the label's row (`|y - label.y| < ROW_TOLERANCE`),
/// strictly to its right, are longer than the rule's minimum and do not
/// match its exclusion pattern. The nearest candidate by `x` wins,
/// which reconstructs the printed label/value pair even when stray
/// tokens share the row.
pub fn resolve_label_value(tokens: &[Token], rule: &LabelRule) -> Option<String> {
    let label = tokens.iter().find(|t| t.text == rule.label)?;
    tokens
        .iter()
        .filter(|t| (t.y - label.y).abs() < ROW_TOLERANCE)
        .filter(|t| t.x > label.x)
        .filter(|t| t.text.chars().count() > rule.min_len)
        .filter(|t| !rule.exclude.is_match(&t.text))
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
        .map(|t| t.text.trim().to_string())
}
