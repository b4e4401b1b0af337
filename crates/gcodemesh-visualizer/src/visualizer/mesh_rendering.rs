//! # Line Mesh Module
//!
//! Wraps finished strokes into line-primitive meshes and defines the
//! material they are drawn with.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::gcode::Stroke;

/// Name given to the shared stroke material
pub const DEFAULT_MATERIAL_NAME: &str = "DefaultMaterial";

/// Primitive type of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Index pairs describe line segments
    Line,
}

/// A renderable polyline mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMesh {
    /// Mesh name
    pub name: String,
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Index pairs, one per segment
    pub indices: Vec<u32>,
    /// Primitive type
    pub primitive: PrimitiveType,
    /// Mesh bounds
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    /// Index into the scene's material list
    pub material_index: usize,
}

/// Material properties for mesh rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshMaterial {
    /// Material name
    pub name: String,
    /// Diffuse color (RGBA)
    pub diffuse_color: [f32; 4],
    /// Specular color (RGBA)
    pub specular_color: [f32; 4],
    /// Ambient color (RGBA)
    pub ambient_color: [f32; 4],
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self {
            name: DEFAULT_MATERIAL_NAME.to_string(),
            diffuse_color: [1.0, 1.0, 1.0, 1.0],
            specular_color: [1.0, 1.0, 1.0, 1.0],
            ambient_color: [0.05, 0.05, 0.05, 1.0],
        }
    }
}

impl MeshMaterial {
    /// Create the default material with custom colors
    pub fn with_colors(diffuse: [f32; 4], specular: [f32; 4], ambient: [f32; 4]) -> Self {
        Self {
            diffuse_color: diffuse,
            specular_color: specular,
            ambient_color: ambient,
            ..Default::default()
        }
    }
}

impl LineMesh {
    /// Build a mesh from a stroke
    pub fn from_stroke(name: impl Into<String>, stroke: Stroke) -> Self {
        let (bounds_min, bounds_max) = stroke.bounds();
        let (vertices, indices) = stroke.into_parts();
        Self {
            name: name.into(),
            vertices,
            indices,
            primitive: PrimitiveType::Line,
            bounds_min,
            bounds_max,
            material_index: 0,
        }
    }

    /// Set the material index
    pub fn with_material(mut self, material_index: usize) -> Self {
        self.material_index = material_index;
        self
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get segment (face) count
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Get bounds as (min, max) Vec3 tuple
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }

    /// Segment faces as index pairs
    pub fn faces(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.indices.chunks_exact(2).map(|pair| [pair[0], pair[1]])
    }
}
