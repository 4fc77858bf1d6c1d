use std::path::{Path, PathBuf};
use thiserror::Error;

/// The primary error type for fatal, run-level failures in `textswap`.
///
/// Every variant aborts the run before (or instead of) touching any file.
/// Failures that concern a single file during a batch are [`FileError`]s instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration source exists but could not be read.
    #[error("Could not read config file: {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file could not be located.
    #[error("Config file '{}' not found. Searched in:\n  - {}", .path.display(), .tried.join("\n  - "))]
    ConfigNotFound { path: PathBuf, tried: Vec<String> },

    /// The configuration file is not valid JSON.
    #[error("Invalid JSON in config file: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The configuration file is not valid YAML.
    #[error("Invalid YAML in config file: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// The document has no `dictionaries` object at its root.
    #[error("Config must contain a 'dictionaries' object")]
    MissingDictionaries,

    /// The document parsed but some field has the wrong shape.
    #[error("Invalid config: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    /// The `dictionaries` object is empty.
    #[error("No dictionaries found in config")]
    NoDictionaries,

    /// A dictionary was requested by name but the config does not define it.
    #[error("Dictionary '{0}' not found")]
    DictionaryNotFound(String),

    /// Several dictionaries exist, none was named and nobody can be asked.
    #[error("Several dictionaries are defined, pass one with --dict-name: {}", .available.join(", "))]
    DictionaryNameRequired { available: Vec<String> },

    /// A direction other than 1 or 2.
    #[error("Invalid direction {0}: use 1 for keys-to-values, 2 for values-to-keys")]
    InvalidDirection(u8),

    /// The target folder does not exist or is not a directory.
    #[error("Folder '{}' does not exist or is not a directory", .0.display())]
    FolderNotFound(PathBuf),

    /// An error related to file system I/O outside the per-file boundary.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, textswap::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a file that reached the replacement engine could not be fully processed.
///
/// These never escape the per-file boundary: the batch records them as skip
/// reasons and moves on to the next file. The `Display` output is the
/// human-readable skip reason shown in the summary.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Skipped (not UTF-8 encoded): {}", .path.display())]
    NotUtf8 { path: PathBuf },

    #[error("Skipped (permission denied): {}", .path.display())]
    ReadPermissionDenied { path: PathBuf },

    #[error("Skipped (read error): {} - {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Skipped (write permission denied): {}", .path.display())]
    WritePermissionDenied { path: PathBuf },

    #[error("Skipped (write error): {} - {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FileError {
    /// Classifies an I/O error raised while reading `path`.
    pub fn from_read(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => FileError::ReadPermissionDenied { path },
            std::io::ErrorKind::InvalidData => FileError::NotUtf8 { path },
            _ => FileError::Read { path, source: err },
        }
    }

    /// Classifies an I/O error raised while writing `path`.
    pub fn from_write(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => FileError::WritePermissionDenied { path },
            _ => FileError::Write { path, source: err },
        }
    }

    /// The file this error is about.
    pub fn path(&self) -> &Path {
        match self {
            FileError::NotUtf8 { path }
            | FileError::ReadPermissionDenied { path }
            | FileError::Read { path, .. }
            | FileError::WritePermissionDenied { path }
            | FileError::Write { path, .. } => path,
        }
    }
}
