//! Merged scene buffers and the per-export Scene container

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::node::MeshNode;

/// Single merged vertex/index/normal view of a scene
///
/// Face indices are global: each appended mesh has its indices offset by
/// the number of vertices emitted before it, so the buffers stay
/// self-consistent with no hierarchy. Normals stay aligned 1:1 with faces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneBuffers {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
    pub normals: Vec<Vec3>,
}

impl SceneBuffers {
    /// Create empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Append one mesh, offsetting its face indices by the vertices
    /// already present
    pub fn append(&mut self, vertices: &[Vec3], faces: &[[u32; 3]], normals: &[Vec3]) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        for face in faces {
            self.faces
                .push([face[0] + offset, face[1] + offset, face[2] + offset]);
        }
        self.normals.extend_from_slice(normals);
    }

    /// Append a node subtree, converting vertices to world space
    ///
    /// World position = local vertex + that node's origin; the walk is
    /// depth-first in child order, so output order matches the tree.
    pub fn append_tree(&mut self, node: &MeshNode) {
        let world: Vec<Vec3> = node.vertices.iter().map(|v| *v + node.origin).collect();
        self.append(&world, &node.faces, &node.normals);
        for child in &node.children {
            self.append_tree(child);
        }
    }
}

/// Everything one tessellation pass produced
///
/// Built fresh per export and discarded afterwards; never reused across
/// exports. `buffers` is only populated by the single-body path; the
/// hierarchical path flattens on demand via [`Scene::flatten_tree`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// One root MeshNode per root CAD object
    pub roots: Vec<MeshNode>,
    /// Merged buffers (single-body exports)
    pub buffers: SceneBuffers,
}

impl Scene {
    /// Flatten the whole node tree into fresh merged buffers
    pub fn flatten_tree(&self) -> SceneBuffers {
        let mut buffers = SceneBuffers::new();
        for root in &self.roots {
            buffers.append_tree(root);
        }
        buffers
    }
}
