mod config;
pub mod store;

pub use config::Config;
pub use store::{DocKey, DocumentStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Resolve the data directory, creating it if needed.
///
/// Defaults to `~/.config/keyflow/`. Setting `KEYFLOW_ENV=dev` switches to
/// `~/.config/keyflow-dev/` so development runs never touch real progress
/// data.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("KEYFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("keyflow-dev")
    } else {
        base_dir.join("keyflow")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
