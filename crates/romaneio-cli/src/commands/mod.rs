//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod run;

use romaneio_core::RomaneioConfig;

/// Load configuration from an explicit path, the default location, or
/// fall back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RomaneioConfig> {
    if let Some(path) = config_path {
        return Ok(RomaneioConfig::from_file(std::path::Path::new(path))?);
    }
    let default = config::default_config_path();
    if default.exists() {
        Ok(RomaneioConfig::from_file(&default)?)
    } else {
        Ok(RomaneioConfig::default())
    }
}
