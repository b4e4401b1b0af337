//! Scene assembly
//!
//! A scene holds one line mesh per stroke, a root node named `G` with one
//! child node per mesh, and a single material shared by every mesh.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mesh_rendering::{LineMesh, MeshMaterial};
use crate::gcode::{ParseStats, ParsedToolpath, Stroke};

/// Name of the scene root node
pub const ROOT_NODE_NAME: &str = "G";

/// Node in the scene hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Node name
    pub name: String,
    /// Indices into [`Scene::meshes`]
    pub meshes: Vec<usize>,
    /// Child nodes
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Imported scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Root node
    pub root: SceneNode,
    /// Line meshes in stroke order
    pub meshes: Vec<LineMesh>,
    /// Materials; every mesh uses index 0
    pub materials: Vec<MeshMaterial>,
    /// Counters from the parse that produced the scene
    #[serde(default)]
    pub stats: ParseStats,
}

impl Scene {
    /// Build a scene from strokes with the given shared material
    pub fn from_strokes(strokes: Vec<Stroke>, material: MeshMaterial) -> Self {
        let mut root = SceneNode::new(ROOT_NODE_NAME);
        let meshes: Vec<LineMesh> = strokes
            .into_iter()
            .enumerate()
            .map(|(i, stroke)| LineMesh::from_stroke(i.to_string(), stroke).with_material(0))
            .collect();

        root.children = (0..meshes.len())
            .map(|i| SceneNode {
                name: String::new(),
                meshes: vec![i],
                children: Vec::new(),
            })
            .collect();

        debug!(
            "Scene assembled: {} meshes, {} vertices",
            meshes.len(),
            meshes.iter().map(LineMesh::vertex_count).sum::<usize>()
        );

        Self {
            root,
            meshes,
            materials: vec![material],
            stats: ParseStats::default(),
        }
    }

    /// Build a scene from a parse result, keeping its counters
    pub fn from_toolpath(toolpath: ParsedToolpath, material: MeshMaterial) -> Self {
        let stats = toolpath.stats;
        Self {
            stats,
            ..Self::from_strokes(toolpath.strokes, material)
        }
    }

    /// Number of meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Check if the scene has no meshes
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Total vertices across meshes
    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(LineMesh::vertex_count).sum()
    }

    /// Total segments across meshes
    pub fn total_segments(&self) -> usize {
        self.meshes.iter().map(LineMesh::segment_count).sum()
    }

    /// Get combined bounds of all meshes
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.meshes.is_empty() {
            return None;
        }

        let mut min_bounds = Vec3::splat(f32::MAX);
        let mut max_bounds = Vec3::splat(f32::MIN);

        for mesh in &self.meshes {
            min_bounds = min_bounds.min(mesh.bounds_min);
            max_bounds = max_bounds.max(mesh.bounds_max);
        }

        Some((min_bounds, max_bounds))
    }

    /// Serialize the scene to JSON
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::StrokeParser;

    const TWO_STROKES: &str = "G1 X1 E1\nG0 X5\nG1 X6 E1\nG1 X6 Y2 E1\n";

    #[test]
    fn test_scene_structure() {
        let toolpath = StrokeParser::new().parse(TWO_STROKES);
        let scene = Scene::from_toolpath(toolpath, MeshMaterial::default());

        assert_eq!(scene.root.name, "G");
        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(scene.root.children.len(), 2);
        assert_eq!(scene.root.children[1].meshes, vec![1]);
        assert_eq!(scene.meshes[0].name, "0");
        assert_eq!(scene.meshes[1].name, "1");
        assert!(scene.meshes.iter().all(|m| m.material_index == 0));
        assert_eq!(scene.materials.len(), 1);
        assert_eq!(scene.total_vertices(), 5);
        assert_eq!(scene.total_segments(), 3);
        assert_eq!(scene.stats.strokes, 2);
    }

    #[test]
    fn test_scene_bounds() {
        let scene = Scene::from_strokes(
            StrokeParser::new().parse(TWO_STROKES).strokes,
            MeshMaterial::default(),
        );
        let (min, max) = scene.bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(6.0, 2.0, 0.0));
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::from_strokes(Vec::new(), MeshMaterial::default());
        assert!(scene.is_empty());
        assert!(scene.root.children.is_empty());
        assert_eq!(scene.materials.len(), 1);
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn test_scene_json_round_trip() {
        let scene = Scene::from_toolpath(
            StrokeParser::new().parse(TWO_STROKES),
            MeshMaterial::default(),
        );
        let json = scene.to_json(false).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene);
    }
}
