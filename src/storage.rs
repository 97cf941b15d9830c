//! Versioned record files in the game's data directory.
//!
//! Every persisted value is wrapped in an envelope naming what it is and
//! which layout version wrote it:
//!
//! ```json
//! { "format": "hangman.config", "version": 1, "data": { ... } }
//! ```
//!
//! Readers reject envelopes with a different tag or version instead of
//! guessing at their contents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const RECORD_VERSION: u32 = 1;
/// Directory next to the working directory that takes precedence over the
/// platform data directory when present.
pub const PORTABLE_DATA_DIR: &str = "Hangman Data";
const APP_DIR: &str = "hangman";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} holds a \"{found}\" record, expected \"{expected}\"", path.display())]
    WrongFormat {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("{} was written by record version {found}, expected {RECORD_VERSION}", path.display())]
    UnsupportedVersion { path: PathBuf, found: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    format: String,
    version: u32,
    data: T,
}

#[derive(Debug, Deserialize)]
struct EnvelopeHeader {
    format: String,
    version: u32,
}

/// Resolves the directory holding config and score files.
///
/// An explicit directory wins; otherwise a `Hangman Data` directory in the
/// working directory is used if it exists, then the platform data directory.
#[must_use]
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    let portable = PathBuf::from(PORTABLE_DATA_DIR);
    if portable.is_dir() {
        return portable;
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or(portable)
}

/// Reads a record. `Ok(None)` means the file does not exist.
pub fn read_record<T: DeserializeOwned>(path: &Path, format: &str) -> Result<Option<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let malformed = |source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    // Check the header first so a record of another version is reported as
    // such rather than as a body that failed to parse.
    let header: EnvelopeHeader = serde_json::from_str(&contents).map_err(malformed)?;
    if header.format != format {
        return Err(StoreError::WrongFormat {
            path: path.to_path_buf(),
            expected: format.to_string(),
            found: header.format,
        });
    }
    if header.version != RECORD_VERSION {
        return Err(StoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: header.version,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&contents).map_err(malformed)?;
    Ok(Some(envelope.data))
}

pub fn write_record<T: Serialize>(path: &Path, format: &str, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let envelope = Envelope {
        format: format.to_string(),
        version: RECORD_VERSION,
        data,
    };
    let contents = serde_json::to_string_pretty(&envelope).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, contents).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Removes a record file. Returns whether there was one to remove.
pub fn remove_record(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
