//! One-shot export orchestration
//!
//! Runs the whole document-to-file pipeline synchronously on the calling
//! thread: open the document, tessellate, close the document, hand the
//! scene to a writer. Every call builds a fresh scene; nothing is cached
//! between exports.

use std::path::Path;

use meshport_cad::CadSource;

use crate::buffers::{Scene, SceneBuffers};
use crate::config::{TessellationConfig, TessellationMode};
use crate::error::ExportError;
use crate::export::{AssetFormat, ObjWriter, SceneExporter, SceneSink};
use crate::tessellate::Tessellator;

/// Open a document, tessellate it, and close it again
///
/// The document handle is released on success and on every error path
/// before this function returns.
pub fn tessellate_document(
    source: &dyn CadSource,
    input: &Path,
    config: &TessellationConfig,
) -> Result<Scene, ExportError> {
    let doc = source
        .open(input)
        .map_err(|e| ExportError::Input(e.to_string()))?;

    let result = Tessellator::new(source, config).run(&doc);
    // Release the document whether the walk succeeded or not
    source.close(doc);
    let scene = result?;

    for root in &scene.roots {
        tracing::debug!("Tessellated tree:\n{}", root.outline());
    }
    Ok(scene)
}

/// Export a document to the text mesh format
pub fn export_obj(
    source: &dyn CadSource,
    input: &Path,
    output: &Path,
    config: &TessellationConfig,
    writer: &ObjWriter,
) -> Result<(), ExportError> {
    let scene = tessellate_document(source, input, config)?;
    let buffers: SceneBuffers = match config.mode {
        TessellationMode::SingleBody => scene.buffers,
        TessellationMode::Recursive => scene.flatten_tree(),
    };
    writer.save(output, &buffers)
}

/// Export a document to the binary scene format through a sink
pub fn export_scene(
    source: &dyn CadSource,
    input: &Path,
    output: &Path,
    config: &TessellationConfig,
    sink: &mut dyn SceneSink,
) -> Result<(), ExportError> {
    let scene = tessellate_document(source, input, config)?;
    SceneExporter::new(sink).export(&scene, output)
}

/// Export to the format implied by the output path's extension
pub fn export(
    source: &dyn CadSource,
    input: &Path,
    output: &Path,
    config: &TessellationConfig,
    sink: &mut dyn SceneSink,
) -> Result<(), ExportError> {
    match AssetFormat::from_path(output) {
        AssetFormat::Obj => export_obj(source, input, output, config, &ObjWriter::new()),
        AssetFormat::Scene => export_scene(source, input, output, config, sink),
        AssetFormat::Unknown => Err(ExportError::UnsupportedFormat(
            output.to_string_lossy().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use glam::Vec3;
    use meshport_cad::{
        CadError, CadNode, CadResult, DocumentHandle, RawMesh, ShapeHandle,
    };

    use crate::export::{MeshId, NodeId, SceneSinkError};

    use super::*;

    /// Stub source counting open/close pairs, optionally failing at each stage
    #[derive(Default)]
    struct CountingSource {
        roots: Vec<CadNode>,
        meshes: HashMap<ShapeHandle, RawMesh>,
        fail_open: bool,
        fail_tessellate: bool,
        opened: AtomicUsize,
        closed: AtomicUsize,
    }

    impl CadSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn open(&self, path: &Path) -> CadResult<DocumentHandle> {
            if self.fail_open {
                return Err(CadError::DocumentOpen(format!("{:?} not found", path)));
            }
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(DocumentHandle::new())
        }

        fn root_objects(&self, _doc: &DocumentHandle) -> CadResult<Vec<CadNode>> {
            Ok(self.roots.clone())
        }

        fn tessellate(&self, shape: &ShapeHandle, _density: f32) -> CadResult<RawMesh> {
            if self.fail_tessellate {
                return Err(CadError::TessellationFailed("shape is broken".into()));
            }
            self.meshes
                .get(shape)
                .cloned()
                .ok_or_else(|| CadError::TessellationFailed("unknown shape".into()))
        }

        fn mesh_from_shape(
            &self,
            shape: &ShapeHandle,
            _linear_deflection: f32,
            _angular_deflection: f32,
            _relative: bool,
        ) -> CadResult<RawMesh> {
            self.tessellate(shape, 1.0)
        }

        fn close(&self, _doc: DocumentHandle) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn triangle_source() -> CountingSource {
        let shape = ShapeHandle::new();
        CountingSource {
            roots: vec![CadNode::leaf("tri", Vec3::ZERO, shape, 1)],
            meshes: HashMap::from([(
                shape,
                RawMesh {
                    vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                    faces: vec![[0, 1, 2]],
                },
            )]),
            ..Default::default()
        }
    }

    /// Sink that only counts saves; never fails
    #[derive(Default)]
    struct CountingSink {
        saves: usize,
        nodes: usize,
    }

    impl SceneSink for CountingSink {
        fn create_mesh(
            &mut self,
            _name: &str,
            _control_point_count: usize,
        ) -> Result<MeshId, SceneSinkError> {
            Ok(0)
        }

        fn set_control_point(
            &mut self,
            _mesh: MeshId,
            _index: usize,
            _position: Vec3,
        ) -> Result<(), SceneSinkError> {
            Ok(())
        }

        fn add_triangle(
            &mut self,
            _mesh: MeshId,
            _indices: [u32; 3],
        ) -> Result<(), SceneSinkError> {
            Ok(())
        }

        fn add_face_normal(
            &mut self,
            _mesh: MeshId,
            _normal: Vec3,
        ) -> Result<(), SceneSinkError> {
            Ok(())
        }

        fn create_node(
            &mut self,
            _name: &str,
            _mesh: MeshId,
            _translation: Vec3,
            _parent: Option<NodeId>,
        ) -> Result<NodeId, SceneSinkError> {
            self.nodes += 1;
            Ok(self.nodes as u64 - 1)
        }

        fn save(&mut self, _path: &Path) -> Result<(), SceneSinkError> {
            self.saves += 1;
            Ok(())
        }
    }

    #[test]
    fn test_document_closed_on_success() {
        let source = triangle_source();
        let config = TessellationConfig::default();
        let scene = tessellate_document(&source, Path::new("in.step"), &config).unwrap();

        assert_eq!(scene.roots.len(), 1);
        assert_eq!(source.opened.load(Ordering::SeqCst), 1);
        assert_eq!(source.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_document_closed_on_tessellation_failure() {
        let mut source = triangle_source();
        source.fail_tessellate = true;
        let config = TessellationConfig::default();

        let result = tessellate_document(&source, Path::new("in.step"), &config);
        assert!(matches!(result, Err(ExportError::Tessellation { .. })));
        assert_eq!(source.opened.load(Ordering::SeqCst), 1);
        assert_eq!(source.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_open_failure_is_input_error() {
        let mut source = triangle_source();
        source.fail_open = true;
        let config = TessellationConfig::default();

        let result = tessellate_document(&source, Path::new("missing.step"), &config);
        assert!(matches!(result, Err(ExportError::Input(_))));
        assert_eq!(source.closed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_export_obj_writes_file() {
        let source = triangle_source();
        let config = TessellationConfig::default();
        let output = std::env::temp_dir().join("meshport_pipeline_obj_test.obj");

        export_obj(
            &source,
            Path::new("in.step"),
            &output,
            &config,
            &ObjWriter::new(),
        )
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("f 1//1 2//1 3//1"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 3);
        std::fs::remove_file(&output).ok();
    }

    #[test]
    fn test_export_dispatches_on_extension() {
        let source = triangle_source();
        let config = TessellationConfig::default();
        let mut sink = CountingSink::default();

        let result = export(
            &source,
            Path::new("in.step"),
            Path::new("out.step"),
            &config,
            &mut sink,
        );
        assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));

        export(
            &source,
            Path::new("in.step"),
            Path::new("out.fbx"),
            &config,
            &mut sink,
        )
        .unwrap();
        assert_eq!(sink.saves, 1);
        assert_eq!(sink.nodes, 1);
        // sink path still opens and closes the document
        assert_eq!(
            source.opened.load(Ordering::SeqCst),
            source.closed.load(Ordering::SeqCst)
        );
    }
}
