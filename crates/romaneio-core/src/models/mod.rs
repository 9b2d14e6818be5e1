//! Data models for records and configuration.

pub mod config;
pub mod record;

pub use config::RomaneioConfig;
pub use record::{DeliveryDate, ExtractedRecord};
