//! Destination resolution over a closed city vocabulary.

use regex::Regex;

/// Matches the first allow-listed city in a document, optionally
/// followed by a two-letter state code. This is not a general
/// place-name extractor: only vocabulary entries are ever recognized.
#[derive(Debug, Clone)]
pub struct DestinationResolver {
    pattern: Option<Regex>,
}

impl DestinationResolver {
    /// Compile the vocabulary once. Entries are regex-escaped, so any
    /// city string is safe; an empty vocabulary matches nothing.
    pub fn new(cities: &[String]) -> Self {
        let entries: Vec<String> = cities
            .iter()
            .map(|c| regex::escape(c.trim()))
            .filter(|c| !c.is_empty())
            .collect();
        if entries.is_empty() {
            return Self { pattern: None };
        }
        // the state code stays case-sensitive under (?i), otherwise
        // trailing lowercase words like "de" read as a UF
        let pattern = Regex::new(&format!(
            r"(?i)\b({})\b(?:\s*-?\s*((?-i:[A-Z]{{2}}))\b)?",
            entries.join("|")
        ))
        .unwrap();
        Self {
            pattern: Some(pattern),
        }
    }

    /// First vocabulary match in the text, normalized to uppercase
    /// `CITY` or `CITY - UF`.
    pub fn resolve(&self, text: &str) -> Option<String> {
        let caps = self.pattern.as_ref()?.captures(text)?;
        let city = caps[1].to_uppercase();
        match caps.get(2) {
            Some(uf) => Some(format!("{} - {}", city, uf.as_str().to_uppercase())),
            None => Some(city),
        }
    }
}
