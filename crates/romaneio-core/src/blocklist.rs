//! Disallowed phone number filtering.

use std::collections::HashSet;

use crate::extract::rules::phones::digits_only;

/// Outcome of a blocklist pass. Both halves keep the relative order of
/// the input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub allowed: Vec<String>,
    pub blocked: Vec<String>,
}

/// Fixed set of phone numbers that must never receive a dispatch.
#[derive(Debug, Clone)]
pub struct BlocklistFilter {
    entries: HashSet<String>,
}

impl BlocklistFilter {
    /// Entries are reduced to digits before storage, so formatted and
    /// bare forms of the same number compare equal.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| digits_only(e.as_ref()))
                .collect(),
        }
    }

    /// Whether a phone's digits-only form is a blocklist entry.
    pub fn is_blocked(&self, phone: &str) -> bool {
        self.entries.contains(&digits_only(phone))
    }

    /// Stable partition of candidates into allowed and blocked lists.
    pub fn filter(&self, phones: &[String]) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for phone in phones {
            if self.is_blocked(phone) {
                outcome.blocked.push(phone.clone());
            } else {
                outcome.allowed.push(phone.clone());
            }
        }
        outcome
    }
}
