//! File helpers shared by the loaders
//!
//! A text resource that cannot be opened is a hard failure for the caller;
//! there is no safe default to fall back to.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading engine resources from disk
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The resource could not be opened or read
    #[error("could not open resource {path}: {source}")]
    Open {
        /// Path of the resource that failed to open
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The resource was read but could not be decoded
    #[error("could not decode resource {path}: {reason}")]
    Decode {
        /// Path of the resource that failed to decode
        path: String,
        /// Decoder diagnostic
        reason: String,
    },
}

/// Load an entire text file into a string
pub fn load_text_file(path: &Path) -> Result<String, ResourceError> {
    std::fs::read_to_string(path).map_err(|source| ResourceError::Open {
        path: path.display().to_string(),
        source,
    })
}

/// Best-effort lookup of the user's home directory
pub fn home_directory() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
