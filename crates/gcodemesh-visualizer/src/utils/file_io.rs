//! File I/O Module
//!
//! Reads G-code files into memory for the stroke parser. The parser works
//! on raw bytes, so files are read as-is without UTF-8 validation; the
//! detected encoding is only reported.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use gcodemesh_core::{ImportError, Result};
use serde::{Deserialize, Serialize};

/// Size above which a read is logged as very large (500 MB)
const LARGE_FILE_WARN_BYTES: u64 = 500 * 1024 * 1024;

/// Supported file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileEncoding {
    /// UTF-8 encoding
    Utf8,
    /// Not valid UTF-8 (Latin-1, stray binary bytes); the bytes are still parsed
    Other,
}

impl FileEncoding {
    /// Detect encoding from file bytes
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(&[0xEF, 0xBB, 0xBF]) || std::str::from_utf8(data).is_ok() {
            return FileEncoding::Utf8;
        }

        FileEncoding::Other
    }
}

/// File read statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReadStats {
    /// Total bytes read
    pub bytes_read: u64,
    /// Total line breaks read
    pub lines_read: u64,
    /// Detected encoding
    pub encoding: FileEncoding,
    /// Time taken to read (milliseconds)
    pub read_time_ms: u64,
}

/// G-code file reader
#[derive(Debug, Clone)]
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Create a new G-code file reader
    ///
    /// # Errors
    /// Returns [`ImportError::FileOpen`] if the path does not exist, is not a
    /// file, or its metadata cannot be read
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(ImportError::FileOpen {
                path: path.display().to_string(),
                reason: "file does not exist".to_string(),
            }
            .into());
        }

        if !path.is_file() {
            return Err(ImportError::FileOpen {
                path: path.display().to_string(),
                reason: "path is not a file".to_string(),
            }
            .into());
        }

        let file_size = fs::metadata(&path)
            .map_err(|e| ImportError::file_open(&path, &e))?
            .len();

        Ok(Self { path, file_size })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read entire file into memory
    ///
    /// # Errors
    /// Returns [`ImportError::FileOpen`] if the file cannot be read
    pub fn read_all(&self) -> Result<Vec<u8>> {
        if self.file_size > LARGE_FILE_WARN_BYTES {
            tracing::warn!(
                "Reading very large file ({}MB) into memory",
                self.file_size / (1024 * 1024)
            );
        }

        fs::read(&self.path).map_err(|e| ImportError::file_open(&self.path, &e).into())
    }

    /// Read entire file and report read statistics
    ///
    /// # Errors
    /// Returns [`ImportError::FileOpen`] if the file cannot be read
    pub fn read_all_with_stats(&self) -> Result<(Vec<u8>, FileReadStats)> {
        let start = Instant::now();
        let data = self.read_all()?;

        let stats = FileReadStats {
            bytes_read: data.len() as u64,
            lines_read: data.iter().filter(|b| **b == b'\n').count() as u64,
            encoding: FileEncoding::detect(&data),
            read_time_ms: start.elapsed().as_millis() as u64,
        };

        Ok((data, stats))
    }
}
