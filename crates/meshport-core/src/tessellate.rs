//! CAD tree tessellation into the MeshNode scene graph
//!
//! One pass produces both projections of a document: the hierarchical
//! MeshNode tree and (in single-body mode) the merged scene buffers. Both
//! share the same per-face normal computation and degenerate-face fallback.

use glam::Vec3;
use meshport_cad::{CadNode, CadSource, DocumentHandle, NodeKind, RawMesh};

use crate::buffers::Scene;
use crate::config::{TessellationConfig, TessellationMode};
use crate::error::ExportError;
use crate::node::MeshNode;

/// Substitute normal for triangles whose cross product has zero magnitude
pub const FALLBACK_NORMAL: Vec3 = Vec3::X;

/// Compute the flat-shading normal of one triangle
///
/// Right-hand rule over counter-clockwise winding:
/// `normalize(cross(v1 - v0, v2 - v0))`. Collinear or duplicate vertices
/// yield [`FALLBACK_NORMAL`] instead of a NaN vector.
pub fn face_normal(vertices: &[Vec3], face: [u32; 3]) -> Vec3 {
    let v0 = vertices[face[0] as usize];
    let v1 = vertices[face[1] as usize];
    let v2 = vertices[face[2] as usize];

    match (v1 - v0).cross(v2 - v0).try_normalize() {
        Some(normal) => normal,
        None => {
            tracing::warn!(
                "Degenerate triangle {:?}, substituting fallback normal",
                face
            );
            FALLBACK_NORMAL
        }
    }
}

/// Walks an opened CAD document and produces a [`Scene`]
pub struct Tessellator<'a> {
    source: &'a dyn CadSource,
    config: &'a TessellationConfig,
}

impl<'a> Tessellator<'a> {
    /// Create a tessellator over a source and configuration
    pub fn new(source: &'a dyn CadSource, config: &'a TessellationConfig) -> Self {
        Self { source, config }
    }

    /// Tessellate the document's root objects into a fresh scene
    ///
    /// The caller owns the document handle and is responsible for closing
    /// it; this method never closes it.
    pub fn run(&self, doc: &DocumentHandle) -> Result<Scene, ExportError> {
        let roots = self
            .source
            .root_objects(doc)
            .map_err(|e| ExportError::Input(e.to_string()))?;

        match self.config.mode {
            TessellationMode::Recursive => {
                let mut scene = Scene::default();
                for cad in &roots {
                    scene.roots.push(self.build_node(cad)?);
                }
                Ok(scene)
            }
            TessellationMode::SingleBody => self.sample_roots(&roots),
        }
    }

    /// Recursive path: one MeshNode per document node
    fn build_node(&self, cad: &CadNode) -> Result<MeshNode, ExportError> {
        let mut node = MeshNode::new(&cad.label, cad.world_position);
        node.tess_level = cad.tess_override;

        match &cad.kind {
            NodeKind::Container { children, .. } => {
                for child in children {
                    node.children.push(self.build_node(child)?);
                }
            }
            NodeKind::Leaf { shape, face_count } => {
                // Shapes without faces have nothing to triangulate
                if *face_count > 0 {
                    let density = cad.tess_override.unwrap_or(self.config.density);
                    let raw = self.source.tessellate(shape, density).map_err(|e| {
                        ExportError::Tessellation {
                            label: cad.label.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    fill_geometry(&mut node, &raw);
                    if self.config.center_pivot {
                        node.center_pivot();
                    }
                }
            }
            NodeKind::Other => {
                tracing::debug!("Skipping unrecognized document node '{}'", cad.label);
            }
        }

        Ok(node)
    }

    /// Single-body path: one flat mesh per root object, merged buffers
    /// filled in the same pass
    fn sample_roots(&self, roots: &[CadNode]) -> Result<Scene, ExportError> {
        let mut scene = Scene::default();

        for cad in roots {
            let Some(shape) = cad.shape() else {
                tracing::debug!("No shape to sample on root '{}'", cad.label);
                continue;
            };

            let raw = self
                .source
                .mesh_from_shape(
                    shape,
                    self.config.linear_deflection,
                    self.config.angular_deflection,
                    false,
                )
                .map_err(|e| ExportError::Tessellation {
                    label: cad.label.clone(),
                    reason: e.to_string(),
                })?;

            let mut node = MeshNode::new(&cad.label, cad.world_position);
            fill_geometry(&mut node, &raw);

            // Buffers take world-space vertices; the node keeps local ones.
            scene
                .buffers
                .append(&raw.vertices, &node.faces, &node.normals);

            if self.config.center_pivot {
                node.center_pivot();
            }
            scene.roots.push(node);
        }

        Ok(scene)
    }
}

/// Store raw kernel output on a node: local vertices, faces, face normals
fn fill_geometry(node: &mut MeshNode, raw: &RawMesh) {
    node.vertices.reserve(raw.vertices.len());
    for v in &raw.vertices {
        node.vertices.push(*v - node.origin);
    }
    for face in &raw.faces {
        // Translation cancels in the normal computation, so local
        // vertices give the same result as world ones.
        node.normals.push(face_normal(&node.vertices, *face));
        node.faces.push(*face);
    }
}
