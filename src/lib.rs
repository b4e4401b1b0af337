//! # GCodeMesh
//!
//! Turns the deposition moves of a G-code program into polyline meshes for
//! 3D preview of additive manufacturing toolpaths.
//!
//! ## Architecture
//!
//! GCodeMesh is organized as a workspace with multiple crates:
//!
//! 1. **gcodemesh-core** - Axis values, machine context, error types
//! 2. **gcodemesh-visualizer** - Line tokenizer, motion state machine,
//!    stroke builder, line meshes and the file importer
//! 3. **gcodemesh-settings** - Configuration file handling
//! 4. **gcodemesh** - Command line tool that integrates all crates

use std::fmt::Write as _;

pub use gcodemesh_core::{
    Axis, AxisValues, Error, ImportError, MachineContext, MoveKind, Result,
};

pub use gcodemesh_visualizer::{
    parse_strokes, GcodeImporter, ImporterSettings, LineMesh, MeshMaterial, ParseStats,
    ParsedToolpath, Scene, Stroke, StrokeParser,
};

pub use gcodemesh_settings::{Config, OutputFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout for results
/// - RUST_LOG environment variable support, falling back to `default_level`
pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Material described by the configuration
pub fn material_from_config(config: &Config) -> MeshMaterial {
    MeshMaterial::with_colors(
        config.material.diffuse,
        config.material.specular,
        config.material.ambient,
    )
}

/// Importer described by the configuration
pub fn importer_from_config(config: &Config) -> GcodeImporter {
    GcodeImporter::with_settings(ImporterSettings {
        extensions: config.importer.extensions.clone(),
        max_file_size: config.importer.max_file_size_bytes(),
    })
    .with_material(material_from_config(config))
}

/// Human readable scene summary: one line per mesh, then totals
pub fn format_summary(scene: &Scene) -> String {
    let mut out = String::new();

    for mesh in &scene.meshes {
        let (min, max) = mesh.bounds();
        let _ = writeln!(
            out,
            "mesh {}: {} points, {} segments, bounds ({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})",
            mesh.name,
            mesh.vertex_count(),
            mesh.segment_count(),
            min.x,
            min.y,
            min.z,
            max.x,
            max.y,
            max.z
        );
    }

    let _ = writeln!(
        out,
        "total: {} meshes, {} points, {} segments",
        scene.mesh_count(),
        scene.total_vertices(),
        scene.total_segments()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importer_from_config() {
        let mut config = Config::new();
        config.importer.extensions = vec!["nc".to_string()];
        config.importer.max_file_size_mb = 1;
        config.material.diffuse = [0.5, 0.5, 0.5, 1.0];

        let importer = importer_from_config(&config);
        assert!(importer.can_read("part.nc"));
        assert!(!importer.can_read("part.gcode"));
        assert_eq!(importer.settings().max_file_size, 1024 * 1024);

        let scene = importer.read_str("G1 X1 E1\n");
        assert_eq!(scene.materials[0].diffuse_color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(scene.materials[0].name, "DefaultMaterial");
    }

    #[test]
    fn test_format_summary() {
        let scene = GcodeImporter::new().read_str("G1 X10 E1\nG0 Y5\nG1 X20 E1\nG1 Y10 E1\n");
        let summary = format_summary(&scene);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "mesh 0: 2 points, 1 segments, bounds (0.000, 0.000, 0.000) - (10.000, 0.000, 0.000)"
        );
        assert!(lines[1].starts_with("mesh 1: 3 points, 2 segments"));
        assert_eq!(lines[2], "total: 2 meshes, 5 points, 3 segments");
    }

    #[test]
    fn test_empty_summary() {
        let scene = GcodeImporter::new().read_str("");
        assert_eq!(format_summary(&scene), "total: 0 meshes, 0 points, 0 segments\n");
    }
}
