//! Extracted record models.

use std::fmt;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A delivery date as printed on the document.
///
/// Only the printed ranges are checked (day 1-31, month 1-12); the
/// resolver does not verify full calendar correctness, so a printed
/// 31/02 is kept as-is. Use [`DeliveryDate::to_naive_date`] when a real
/// calendar date is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DeliveryDate {
    /// Build a date, rejecting day/month values outside the printed ranges.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self { year, month, day })
        } else {
            None
        }
    }

    /// Calendar-valid interop; `None` for dates like February 31st.
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for DeliveryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for DeliveryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeliveryDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(D::Error::custom("expected YYYY-MM-DD"));
        }
        let year = parts[0].parse().map_err(D::Error::custom)?;
        let month = parts[1].parse().map_err(D::Error::custom)?;
        let day = parts[2].parse().map_err(D::Error::custom)?;
        DeliveryDate::new(year, month, day)
            .ok_or_else(|| D::Error::custom("day or month out of range"))
    }
}

/// One structured record extracted from a shipping document.
///
/// A document yields one record per distinct plate; records from the
/// same document share model, origin, destination, date and phones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Vehicle plate, uppercase alphanumeric with no separators.
    pub plate: String,

    /// Vehicle model, from positional resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Origin city, from positional resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Destination city, from the closed vocabulary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Delivery deadline, if the document carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DeliveryDate>,

    /// Allowed phone numbers, digits only, first-occurrence order.
    pub phones: Vec<String>,

    /// Source document name.
    pub pdf_name: String,
}
