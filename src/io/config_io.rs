use std::fs;
use std::path::Path;

use crate::io::catalog_io::CatalogError;
use crate::model::config::EngineConfig;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "taxon.toml";

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<EngineConfig, CatalogError> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Resolve the config: an explicit path must exist; otherwise `taxon.toml`
/// in `dir` is used when present, else defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<EngineConfig, CatalogError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "using config");
        read_config(&candidate)
    } else {
        Ok(EngineConfig::default())
    }
}
