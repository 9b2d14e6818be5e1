//! Configuration structures for the extraction and dispatch pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the romaneio pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RomaneioConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Blocklist configuration.
    pub blocklist: BlocklistConfig,

    /// Dispatch configuration.
    pub dispatch: DispatchConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

impl Default for RomaneioConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            blocklist: BlocklistConfig::default(),
            dispatch: DispatchConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Cities recognized as destinations. Closed vocabulary: anything
    /// outside this list is never a destination.
    pub destination_cities: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            destination_cities: [
                "SAO PAULO",
                "GUARULHOS",
                "CAMPINAS",
                "SANTO ANDRE",
                "SAO BERNARDO DO CAMPO",
                "OSASCO",
                "BARUERI",
                "SOROCABA",
                "JUNDIAI",
                "RIBEIRAO PRETO",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Blocklist configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocklistConfig {
    /// Phone numbers that must never receive a dispatch, digits only.
    pub numbers: Vec<String>,
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            numbers: ["11945509645", "11945272040", "1136518801"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Messaging endpoint that receives `?phone=<digits>&text=<message>`.
    pub endpoint: String,

    /// Message template. `{placa}` is replaced once per document with
    /// the document's first resolved plate.
    pub template: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://web.whatsapp.com/send".to_string(),
            template: "Olá! Temos uma coleta programada para o veículo {placa}. Podemos confirmar a entrega?".to_string(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the append-only record file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("records.jsonl"),
        }
    }
}

impl RomaneioConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
