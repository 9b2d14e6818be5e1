//! Core library for shipping-manifest processing.
//!
//! This crate provides:
//! - the document model and tokenizer adapter boundary (PDF text or
//!   positioned token dumps)
//! - pattern-based field resolvers for phones, vehicle plates,
//!   destination cities and delivery dates
//! - label-anchored positional resolution for fields that are not
//!   reliably pattern-matchable (model, origin city)
//! - blocklist filtering of disallowed phone numbers
//! - the per-document recipient dispatch queue and sink boundary
//! - the record store boundary for finalized records

pub mod blocklist;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod store;

pub use blocklist::{BlocklistFilter, FilterOutcome};
pub use dispatch::{DispatchQueue, DispatchSink, QueueState};
pub use document::{Document, Token};
pub use error::{Result, RomaneioError};
pub use extract::{DocumentExtraction, RecordAssembler};
pub use models::{DeliveryDate, ExtractedRecord, RomaneioConfig};
pub use store::{JsonlStore, MemoryStore, RecordStore, StoredRecord};
