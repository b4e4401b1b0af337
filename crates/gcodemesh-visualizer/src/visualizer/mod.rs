//! Scene output for parsed strokes
//!
//! This module provides:
//! - Line meshes built from strokes
//! - The shared default material
//! - Scene assembly under a single root node

pub mod mesh_rendering;
pub mod scene;

pub use mesh_rendering::{LineMesh, MeshMaterial, PrimitiveType, DEFAULT_MATERIAL_NAME};
pub use scene::{Scene, SceneNode, ROOT_NODE_NAME};
