//! Local JSON persistence for view state.
//!
//! Handles reading/writing small state files to disk with atomic
//! operations (write to a temp file, then rename into place).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::CmoError;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to serialize {name}: {message}")]
    Serialize { name: &'static str, message: String },

    #[error("IO error writing '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CmoError for PersistError {
    fn error_code(&self) -> &'static str {
        match self {
            PersistError::Serialize { .. } => "PERSIST_SERIALIZE_FAILED",
            PersistError::IoError { .. } => "PERSIST_IO_ERROR",
        }
    }
}

/// Base directory for all CMO data.
///
/// `$CMO_DIR` overrides the default of `~/.cmo`; falls back to a
/// relative `.cmo` when no home directory can be resolved.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CMO_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".cmo"))
        .unwrap_or_else(|| PathBuf::from(".cmo"))
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.persistence.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after write error"
        );
    }
}

/// Atomically write `value` as pretty JSON to `path`.
///
/// The parent directory is created if missing. `name` labels the value in
/// errors and log events.
pub fn save_json<T: Serialize>(
    path: &Path,
    name: &'static str,
    value: &T,
) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| PersistError::Serialize {
        name,
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistError::IoError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_file = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(PersistError::IoError {
            path: temp_file.display().to_string(),
            source: e,
        });
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(PersistError::IoError {
            path: path.display().to_string(),
            source: e,
        });
    }

    Ok(())
}

/// Load a JSON state file, tolerating absence and corruption.
///
/// A missing file is normal (first run); a corrupt file is logged and
/// treated as missing. Callers always get a usable value.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path, name: &str) -> T {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(
                event = "core.persistence.load_read_error",
                file = %path.display(),
                name = name,
                error = %e,
                message = "Failed to read state file, using defaults"
            );
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                event = "core.persistence.load_invalid_json",
                file = %path.display(),
                name = name,
                error = %e,
                message = "Failed to parse state file, using defaults"
            );
            T::default()
        }
    }
}
