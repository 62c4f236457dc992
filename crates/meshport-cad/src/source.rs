//! The `CadSource` trait and the always-unavailable fallback source

use std::path::Path;

use uuid::Uuid;

use crate::error::{CadError, CadResult};
use crate::node::{CadNode, RawMesh, ShapeHandle};

/// Handle to an opened CAD document
///
/// Returned by [`CadSource::open`] and consumed by [`CadSource::close`].
/// The pipeline must close every handle it opens, on error paths included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHandle {
    pub id: Uuid,
}

impl DocumentHandle {
    /// Create a new unique document handle
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for DocumentHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// The main CAD source trait
///
/// Implementations wrap an actual CAD kernel (document import, shape
/// triangulation, mesh sampling). The pipeline only ever talks to the
/// kernel through this interface.
pub trait CadSource: Send + Sync {
    /// Get the name of this source
    fn name(&self) -> &str;

    /// Check if the source is available
    fn is_available(&self) -> bool;

    /// Open a CAD document from a file
    fn open(&self, path: &Path) -> CadResult<DocumentHandle>;

    /// Get the root objects of an opened document
    fn root_objects(&self, doc: &DocumentHandle) -> CadResult<Vec<CadNode>>;

    /// Triangulate a shape at the given density
    ///
    /// Lower density produces coarser meshes. Vertices are returned in
    /// document space.
    fn tessellate(&self, shape: &ShapeHandle, density: f32) -> CadResult<RawMesh>;

    /// Sample a mesh from a shape with deflection bounds
    ///
    /// `linear_deflection` and `angular_deflection` cap the deviation
    /// between the analytic surface and the triangulation. `relative`
    /// scales the linear bound by the shape's size.
    fn mesh_from_shape(
        &self,
        shape: &ShapeHandle,
        linear_deflection: f32,
        angular_deflection: f32,
        relative: bool,
    ) -> CadResult<RawMesh>;

    /// Close an opened document, releasing backend resources
    fn close(&self, doc: DocumentHandle);
}

/// A null source that always returns errors (used when no backend is available)
#[derive(Debug, Default)]
pub struct NullSource;

impl CadSource for NullSource {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn open(&self, _path: &Path) -> CadResult<DocumentHandle> {
        Err(CadError::SourceUnavailable("No CAD source available".into()))
    }

    fn root_objects(&self, _doc: &DocumentHandle) -> CadResult<Vec<CadNode>> {
        Err(CadError::SourceUnavailable("No CAD source available".into()))
    }

    fn tessellate(&self, _shape: &ShapeHandle, _density: f32) -> CadResult<RawMesh> {
        Err(CadError::SourceUnavailable("No CAD source available".into()))
    }

    fn mesh_from_shape(
        &self,
        _shape: &ShapeHandle,
        _linear_deflection: f32,
        _angular_deflection: f32,
        _relative: bool,
    ) -> CadResult<RawMesh> {
        Err(CadError::SourceUnavailable("No CAD source available".into()))
    }

    fn close(&self, _doc: DocumentHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_source_reports_unavailable() {
        let source = NullSource;
        assert!(!source.is_available());
        assert_eq!(source.name(), "null");
        assert!(matches!(
            source.open(Path::new("model.step")),
            Err(CadError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_null_source_rejects_all_operations() {
        let source = NullSource;
        let doc = DocumentHandle::new();
        let shape = ShapeHandle::new();

        assert!(source.root_objects(&doc).is_err());
        assert!(source.tessellate(&shape, 1.0).is_err());
        assert!(source.mesh_from_shape(&shape, 0.1, 0.523599, false).is_err());
        // close must be callable regardless
        source.close(doc);
    }
}
