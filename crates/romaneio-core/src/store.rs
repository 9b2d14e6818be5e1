//! Record persistence.
//!
//! Records land in an append-only JSON Lines file, one object per line.
//! The store never blocks the dispatch flow: existence checks fail open
//! and insert failures are surfaced to the caller to log and move on.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{DeliveryDate, ExtractedRecord};

/// A record as persisted, with its workflow fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DeliveryDate>,
    pub phones: Vec<String>,
    pub pdf_name: String,
    /// Workflow stage; every new record enters at "collect".
    pub status: String,
    /// Release state; every new record starts "pending".
    pub liberation: String,
}

impl StoredRecord {
    pub fn from_record(record: &ExtractedRecord) -> Self {
        Self {
            plate: record.plate.clone(),
            model: record.model.clone(),
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            delivery_date: record.delivery_date,
            phones: record.phones.clone(),
            pdf_name: record.pdf_name.clone(),
            status: "collect".to_string(),
            liberation: "pending".to_string(),
        }
    }
}

/// Persistence seam for extracted records.
pub trait RecordStore {
    /// Whether any record from this source document is already
    /// persisted. The document name is the duplicate-detection key.
    fn exists(&self, pdf_name: &str) -> Result<bool, StoreError>;

    fn insert(&mut self, record: &StoredRecord) -> Result<(), StoreError>;
}

/// JSON Lines store backed by a single append-only file.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonlStore {
    fn exists(&self, pdf_name: &str) -> Result<bool, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            // no file yet means no records yet
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(StoreError::Query(err.to_string())),
        };
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| StoreError::Query(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let record: StoredRecord =
                serde_json::from_str(&line).map_err(|e| StoreError::Query(e.to_string()))?;
            if record.pdf_name == pdf_name {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn insert(&mut self, record: &StoredRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        let line =
            serde_json::to_string(record).map_err(|e| StoreError::Write(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| StoreError::Write(e.to_string()))?;
        debug!(plate = %record.plate, path = %self.path.display(), "record persisted");
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn records(&self) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .map_err(|e| StoreError::Query(e.to_string()))?
            .clone())
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, pdf_name: &str) -> Result<bool, StoreError> {
        Ok(self
            .records
            .lock()
            .map_err(|e| StoreError::Query(e.to_string()))?
            .iter()
            .any(|r| r.pdf_name == pdf_name))
    }

    fn insert(&mut self, record: &StoredRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .map_err(|e| StoreError::Write(e.to_string()))?
            .push(record.clone());
        Ok(())
    }
}
