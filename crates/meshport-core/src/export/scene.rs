//! Binary scene-graph export
//!
//! The low-level scene SDK lives behind the [`SceneSink`] trait; the
//! exporter drives it by walking the MeshNode tree: one mesh object per
//! node, attached to a scene node translated to the node's origin and
//! parented the way the tree is. Vertices stay in source-convention
//! coordinates (no axis swap in this path) and the translation is kept on
//! the scene node, never baked into control points.

use std::path::Path;

use glam::Vec3;
use thiserror::Error;

use crate::buffers::Scene;
use crate::error::ExportError;
use crate::node::MeshNode;

/// Identifier of a mesh object created in the sink
pub type MeshId = u64;

/// Identifier of a scene-graph node created in the sink
pub type NodeId = u64;

/// Error type for scene sink operations
#[derive(Debug, Clone, Error)]
pub enum SceneSinkError {
    #[error("Scene initialization failed: {0}")]
    Init(String),

    #[error("Mesh construction failed: {0}")]
    Mesh(String),

    #[error("Scene save failed: {0}")]
    Save(String),
}

/// The scene SDK seam
///
/// Implementations wrap a concrete scene SDK. Saving is atomic: either the
/// whole scene persists or the attempt fails and no partial file is valid.
pub trait SceneSink {
    /// Create a mesh object with a control-point buffer of the given size
    fn create_mesh(
        &mut self,
        name: &str,
        control_point_count: usize,
    ) -> Result<MeshId, SceneSinkError>;

    /// Set one control point from a local-space vertex
    fn set_control_point(
        &mut self,
        mesh: MeshId,
        index: usize,
        position: Vec3,
    ) -> Result<(), SceneSinkError>;

    /// Append one triangle polygon, in stored face order
    fn add_triangle(&mut self, mesh: MeshId, indices: [u32; 3]) -> Result<(), SceneSinkError>;

    /// Append one per-face normal
    ///
    /// Normals map per polygon (flat shading): all three corners of face
    /// `i` reference normal `i`.
    fn add_face_normal(&mut self, mesh: MeshId, normal: Vec3) -> Result<(), SceneSinkError>;

    /// Create a flat-shaded scene node carrying a mesh, translated to
    /// `translation`, parented under `parent` (the scene root when `None`)
    fn create_node(
        &mut self,
        name: &str,
        mesh: MeshId,
        translation: Vec3,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneSinkError>;

    /// Persist the scene to a file, atomically
    fn save(&mut self, path: &Path) -> Result<(), SceneSinkError>;
}

/// Drives a [`SceneSink`] from a tessellated [`Scene`]
pub struct SceneExporter<'a> {
    sink: &'a mut dyn SceneSink,
}

impl<'a> SceneExporter<'a> {
    /// Create an exporter over a sink
    pub fn new(sink: &'a mut dyn SceneSink) -> Self {
        Self { sink }
    }

    /// Emit the whole scene into the sink and save it
    ///
    /// Any sink failure aborts the attempt with [`ExportError::Output`];
    /// the process is left intact and the output is not to be trusted.
    pub fn export(&mut self, scene: &Scene, path: &Path) -> Result<(), ExportError> {
        for root in &scene.roots {
            self.emit_node(root, None)
                .map_err(|e| ExportError::Output(e.to_string()))?;
        }
        self.sink
            .save(path)
            .map_err(|e| ExportError::Output(e.to_string()))?;

        tracing::info!("Saved scene with {} root node(s) to {:?}", scene.roots.len(), path);
        Ok(())
    }

    fn emit_node(
        &mut self,
        node: &MeshNode,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneSinkError> {
        let mesh = self.sink.create_mesh(&node.name, node.vertices.len())?;
        for (i, v) in node.vertices.iter().enumerate() {
            self.sink.set_control_point(mesh, i, *v)?;
        }
        for (face, normal) in node.faces.iter().zip(&node.normals) {
            self.sink.add_triangle(mesh, *face)?;
            self.sink.add_face_normal(mesh, *normal)?;
        }

        let id = self.sink.create_node(&node.name, mesh, node.origin, parent)?;
        for child in &node.children {
            self.emit_node(child, Some(id))?;
        }
        Ok(id)
    }
}
