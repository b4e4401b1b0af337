//! Error handling for GCodeMesh
//!
//! The parsing core never fails: unknown codes, unknown words and malformed
//! numbers all degrade to a skipped line or an absent axis. The only errors
//! that exist are raised around it, when a source file cannot be located,
//! opened or accepted by the importer.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Importer error type
///
/// Represents failures to obtain the text buffer the parser runs on.
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    /// The file could not be opened or read
    #[error("Failed to open G-code file {path}.")]
    FileOpen {
        /// The path that was requested.
        path: String,
        /// The underlying reason reported by the OS.
        reason: String,
    },

    /// The file extension is not one the importer accepts
    #[error("Unsupported file format: {path}")]
    UnsupportedFormat {
        /// The rejected path.
        path: String,
    },

    /// The file exceeds the configured size limit
    #[error("File {path} is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge {
        /// The rejected path.
        path: String,
        /// Actual file size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
}

impl ImportError {
    /// Build a [`ImportError::FileOpen`] from a path and an I/O error
    pub fn file_open(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        ImportError::FileOpen {
            path: path.as_ref().display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Main error type for GCodeMesh
#[derive(Error, Debug)]
pub enum Error {
    /// Importer error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an importer error
    pub fn is_import_error(&self) -> bool {
        matches!(self, Error::Import(_))
    }

    /// Check if the source file could not be opened
    pub fn is_file_open_error(&self) -> bool {
        matches!(self, Error::Import(ImportError::FileOpen { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_open_message() {
        let err = ImportError::FileOpen {
            path: "part.gcode".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to open G-code file part.gcode.");
    }

    #[test]
    fn test_file_too_large_message() {
        let err = ImportError::FileTooLarge {
            path: "big.gcode".to_string(),
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "File big.gcode is 2048 bytes, larger than the 1024 byte limit"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ImportError::UnsupportedFormat {
            path: "model.stl".to_string(),
        }
        .into();
        assert!(err.is_import_error());
        assert!(!err.is_file_open_error());
        assert_eq!(err.to_string(), "Unsupported file format: model.stl");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = ImportError::file_open("a.gcode", &io_err).into();
        assert!(err.is_file_open_error());

        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(Error::other("plain").to_string(), "plain");
    }
}
