//! G-code scene importer
//!
//! Reads a G-code file, parses its deposition moves into strokes and
//! assembles them into a [`Scene`] of line meshes.

use std::path::Path;

use gcodemesh_core::{ImportError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::gcode::StrokeParser;
use crate::utils::GcodeFileReader;
use crate::visualizer::{MeshMaterial, Scene};

/// Default maximum file size accepted by the importer (512 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Importer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImporterSettings {
    /// Accepted file extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Largest file read, in bytes
    pub max_file_size: u64,
}

impl Default for ImporterSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["gcode".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Kind of content an importer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImporterFlavour {
    Text,
    Binary,
}

/// Importer descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImporterDesc {
    pub name: String,
    pub flavour: ImporterFlavour,
    pub extensions: Vec<String>,
}

/// Importer from G-code files to line-mesh scenes
#[derive(Debug, Clone, Default)]
pub struct GcodeImporter {
    settings: ImporterSettings,
    material: MeshMaterial,
}

impl GcodeImporter {
    /// Create an importer with default settings and material
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an importer with the given settings
    pub fn with_settings(settings: ImporterSettings) -> Self {
        Self {
            settings,
            material: MeshMaterial::default(),
        }
    }

    /// Replace the material shared by imported meshes
    pub fn with_material(mut self, material: MeshMaterial) -> Self {
        self.material = material;
        self
    }

    /// Importer settings
    pub fn settings(&self) -> &ImporterSettings {
        &self.settings
    }

    /// Describe this importer
    pub fn info(&self) -> ImporterDesc {
        ImporterDesc {
            name: "G-code Importer".to_string(),
            flavour: ImporterFlavour::Text,
            extensions: self.settings.extensions.clone(),
        }
    }

    /// Check whether the path carries an accepted extension
    pub fn can_read(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.settings
                    .extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Import a G-code file
    ///
    /// # Errors
    /// - [`ImportError::UnsupportedFormat`] if the extension is not accepted
    /// - [`ImportError::FileOpen`] if the file cannot be opened or read
    /// - [`ImportError::FileTooLarge`] if the file exceeds the size limit
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Scene> {
        let path = path.as_ref();
        if !self.can_read(path) {
            return Err(ImportError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into());
        }

        let reader = GcodeFileReader::new(path)?;
        if reader.file_size() > self.settings.max_file_size {
            return Err(ImportError::FileTooLarge {
                path: path.display().to_string(),
                size: reader.file_size(),
                limit: self.settings.max_file_size,
            }
            .into());
        }

        info!("Importing G-code file: {}", path.display());
        let (data, read_stats) = reader.read_all_with_stats()?;
        debug!(
            "Read {} bytes ({} lines, {:?}) in {}ms",
            read_stats.bytes_read,
            read_stats.lines_read,
            read_stats.encoding,
            read_stats.read_time_ms
        );

        let scene = self.read_bytes(&data);
        info!(
            "Imported {}: {} meshes, {} vertices",
            path.display(),
            scene.mesh_count(),
            scene.total_vertices()
        );
        Ok(scene)
    }

    /// Import G-code from an in-memory buffer
    pub fn read_bytes(&self, data: &[u8]) -> Scene {
        let toolpath = StrokeParser::new().parse_bytes(data);
        Scene::from_toolpath(toolpath, self.material.clone())
    }

    /// Import G-code from text
    pub fn read_str(&self, source: &str) -> Scene {
        self.read_bytes(source.as_bytes())
    }
}
