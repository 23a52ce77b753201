use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymbolMapError {
    #[error("Input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed input {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SymbolMapError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput { path: path.into(), reason: reason.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Wrap a csv reader error, keeping the file it came from.
    /// Underlying I/O failures stay `Io`; anything else is a malformed table.
    pub fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(source) => Self::Io { path, source },
                other => Self::MalformedInput { path, reason: format!("{other:?}") },
            }
        } else {
            Self::MalformedInput { path, reason: err.to_string() }
        }
    }

    /// True for the two fatal input kinds the batch run reports to the user.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputNotFound { .. } | Self::MalformedInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, SymbolMapError>;
