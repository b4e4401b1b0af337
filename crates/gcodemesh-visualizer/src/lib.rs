//! # GCodeMesh Visualizer
//!
//! G-code stroke parsing and scene assembly for GCodeMesh.
//! Includes the line tokenizer, the motion state machine, the stroke
//! builder, line meshes and the file importer.

pub mod gcode;
pub mod importer;
pub mod utils;
pub mod visualizer;

pub use gcode::{
    apply, parse_strokes, Instruction, LineTokenizer, Motion, ParseStats, ParsedToolpath, Stroke,
    StrokeBuilder, StrokeParser,
};

pub use importer::{
    GcodeImporter, ImporterDesc, ImporterFlavour, ImporterSettings, DEFAULT_MAX_FILE_SIZE,
};

pub use utils::{FileEncoding, FileReadStats, GcodeFileReader};

pub use visualizer::{
    LineMesh, MeshMaterial, PrimitiveType, Scene, SceneNode, DEFAULT_MATERIAL_NAME, ROOT_NODE_NAME,
};
