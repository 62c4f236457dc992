//! Plain-data view of an opened CAD document's object tree

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to a solid shape held by the CAD source
///
/// The actual geometry stays inside the backend; the handle is only valid
/// for the lifetime of the document it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeHandle {
    pub id: Uuid,
}

impl ShapeHandle {
    /// Create a new unique shape handle
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for ShapeHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw triangulation output from the CAD kernel
///
/// Vertices are in document (world) space; faces are index triples into
/// `vertices` with counter-clockwise winding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl RawMesh {
    /// Create an empty raw mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}

/// The recognized kinds of CAD document nodes
///
/// The set is small and fixed, so it is a closed enum and callers match
/// exhaustively. Anything the backend cannot classify is `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    /// Grouping node with no own geometry
    ///
    /// `shape` is the compound shape of the whole subtree when the backend
    /// provides one (used by single-body sampling), otherwise `None`.
    Container {
        children: Vec<CadNode>,
        shape: Option<ShapeHandle>,
    },
    /// Solid shape node
    Leaf {
        shape: ShapeHandle,
        /// Number of analytic faces on the shape; zero means nothing to
        /// triangulate
        face_count: usize,
    },
    /// Unrecognized node type (datum planes, sketches, etc.)
    Other,
}

/// One node of the document's object tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadNode {
    /// User-visible label, as stored in the document
    pub label: String,
    /// World-space position of the node's placement
    pub world_position: Vec3,
    /// Per-node tessellation density override; `None` inherits the global
    /// setting
    pub tess_override: Option<f32>,
    pub kind: NodeKind,
}

impl CadNode {
    /// Create a container node
    pub fn container(label: impl Into<String>, world_position: Vec3, children: Vec<CadNode>) -> Self {
        Self {
            label: label.into(),
            world_position,
            tess_override: None,
            kind: NodeKind::Container {
                children,
                shape: None,
            },
        }
    }

    /// Create a leaf shape node
    pub fn leaf(
        label: impl Into<String>,
        world_position: Vec3,
        shape: ShapeHandle,
        face_count: usize,
    ) -> Self {
        Self {
            label: label.into(),
            world_position,
            tess_override: None,
            kind: NodeKind::Leaf { shape, face_count },
        }
    }

    /// Create a node of unrecognized type
    pub fn other(label: impl Into<String>, world_position: Vec3) -> Self {
        Self {
            label: label.into(),
            world_position,
            tess_override: None,
            kind: NodeKind::Other,
        }
    }

    /// Set the per-node tessellation override
    pub fn with_tess_override(mut self, density: f32) -> Self {
        self.tess_override = Some(density);
        self
    }

    /// The shape this node can be sampled from, if any
    ///
    /// Leaves return their own shape; containers return their compound
    /// shape when the backend provided one.
    pub fn shape(&self) -> Option<&ShapeHandle> {
        match &self.kind {
            NodeKind::Leaf { shape, .. } => Some(shape),
            NodeKind::Container { shape, .. } => shape.as_ref(),
            NodeKind::Other => None,
        }
    }
}
