pub mod draw;
pub mod export;
pub mod generate;
pub mod init;
pub mod list;
pub mod show;

use std::path::{Path, PathBuf};

use tarot_core::CardCatalog;
use tracing::debug;

/// Directory searched for symbol images when writing Word documents.
fn image_base() -> Result<PathBuf, String> {
    std::env::current_dir().map_err(|e| format!("cannot read current directory: {e}"))
}

/// Load the catalog at `path`, or the builtin catalog when no path is given.
fn load_catalog(path: Option<&Path>) -> Result<CardCatalog, String> {
    let catalog = match path {
        Some(path) => CardCatalog::load_file(path),
        None => CardCatalog::builtin(),
    }
    .map_err(|e| e.to_string())?;
    debug!(cards = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Write `content` to `path`, creating parent directories as needed.
fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
    }
    std::fs::write(path, content).map_err(|e| format!("cannot write to {}: {e}", path.display()))
}
