use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::catalog::Catalog;

/// Error type for catalog and config file access
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse config: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize catalog: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Load a catalog snapshot from a JSON file
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let catalog: Catalog = serde_json::from_str(&text).map_err(|e| CatalogError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), count = catalog.categories.len(), "loaded catalog");
    Ok(catalog)
}

/// Save a catalog snapshot as pretty-printed JSON, atomically
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let mut content = serde_json::to_string_pretty(catalog)?;
    content.push('\n');
    atomic_write(path, content.as_bytes()).map_err(|e| CatalogError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), dirty = catalog.dirty_count(), "saved catalog");
    Ok(())
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
