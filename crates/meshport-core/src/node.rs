//! Tessellated scene graph node

use std::fmt::Write;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One node of the tessellated scene graph
///
/// Vertices are stored in local space, relative to `origin`. Normals are
/// per-face (flat shading), aligned 1:1 with `faces`. Children are owned
/// exclusively by their parent, so the graph is always a tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshNode {
    /// Node name, unique only within its sibling list
    pub name: String,
    /// World-space position of the node's local frame
    pub origin: Vec3,
    /// Local-space vertex positions, in triangulation order
    pub vertices: Vec<Vec3>,
    /// Triangle index triples into `vertices`, counter-clockwise winding
    pub faces: Vec<[u32; 3]>,
    /// One normal per face
    pub normals: Vec<Vec3>,
    /// Child nodes
    pub children: Vec<MeshNode>,
    /// Per-node tessellation density override; `None` inherits the global
    /// setting
    pub tess_level: Option<f32>,
}

impl MeshNode {
    /// Create an empty node from a source label and world position
    ///
    /// Whitespace runs in the label are normalized to underscores so the
    /// name survives line-oriented output formats.
    pub fn new(label: &str, origin: Vec3) -> Self {
        Self {
            name: sanitize_label(label),
            origin,
            ..Default::default()
        }
    }

    /// Check if the node has no own geometry
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get the number of triangles on this node (excluding children)
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Smallest and largest vertex index referenced by this node's faces
    ///
    /// Returns `None` when the node has no faces.
    pub fn face_index_bounds(&self) -> Option<(u32, u32)> {
        let mut bounds: Option<(u32, u32)> = None;
        for face in &self.faces {
            for &index in face {
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(index), max.max(index)),
                    None => (index, index),
                });
            }
        }
        bounds
    }

    /// Indented one-line-per-node dump of the subtree, for diagnostics
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_into(&mut out, 0);
        out
    }

    fn outline_into(&self, out: &mut String, level: usize) {
        for _ in 0..level {
            out.push_str("   ");
        }
        out.push_str(&self.name);
        if let Some(v) = self.vertices.first() {
            // String formatting is infallible
            let _ = write!(out, " v:({}, {}, {})", v.x, v.y, v.z);
        }
        for child in &self.children {
            out.push('\n');
            child.outline_into(out, level + 1);
        }
    }
}

/// Normalize a document label into a node name
///
/// Every run of whitespace becomes a single underscore; an all-whitespace
/// or empty label becomes "unnamed".
fn sanitize_label(label: &str) -> String {
    let name = label.split_whitespace().collect::<Vec<_>>().join("_");
    if name.is_empty() {
        "unnamed".to_string()
    } else {
        name
    }
}
