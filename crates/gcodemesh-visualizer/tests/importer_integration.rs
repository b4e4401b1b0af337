//! Importer tests against files on disk

use std::io::Write;

use gcodemesh_visualizer::{GcodeImporter, ImporterSettings, MeshMaterial};
use glam::Vec3;
use tempfile::Builder;

fn gcode_file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".gcode").tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_file_builds_scene() {
    let file = gcode_file(b"G90\nG1 X0 Y0 E1\nG1 X10 Y0 E1\nG0 X10 Y10\nG1 X20 Y10 E1\n");
    let scene = GcodeImporter::new().read_file(file.path()).unwrap();

    assert_eq!(scene.root.name, "G");
    assert_eq!(scene.mesh_count(), 2);
    assert_eq!(scene.meshes[1].vertices, vec![Vec3::new(10.0, 10.0, 0.0), Vec3::new(20.0, 10.0, 0.0)]);
    assert_eq!(scene.materials, vec![MeshMaterial::default()]);
    assert_eq!(scene.stats.depositions, 3);
}

#[test]
fn test_read_file_accepts_non_utf8_bytes() {
    let file = gcode_file(b"; \xff\xfe header\nG1 X1 E1\n");
    let scene = GcodeImporter::new().read_file(file.path()).unwrap();
    assert_eq!(scene.total_segments(), 1);
}

#[test]
fn test_missing_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.gcode");

    let err = GcodeImporter::new().read_file(&path).unwrap_err();
    assert!(err.is_file_open_error());
    assert_eq!(
        err.to_string(),
        format!("Failed to open G-code file {}.", path.display())
    );
}

#[test]
fn test_file_over_limit_is_rejected() {
    let file = gcode_file(b"G1 X1 E1\nG1 X2 E1\n");
    let importer = GcodeImporter::with_settings(ImporterSettings {
        max_file_size: 4,
        ..Default::default()
    });

    let err = importer.read_file(file.path()).unwrap_err();
    assert!(err.is_import_error());
    assert!(err.to_string().contains("4 byte limit"));
}

#[test]
fn test_uppercase_extension_is_accepted() {
    let mut file = Builder::new().suffix(".GCODE").tempfile().unwrap();
    file.write_all(b"G1 X1 E1\n").unwrap();
    file.flush().unwrap();

    let scene = GcodeImporter::new().read_file(file.path()).unwrap();
    assert_eq!(scene.mesh_count(), 1);
}
