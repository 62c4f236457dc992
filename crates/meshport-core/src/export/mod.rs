//! Asset writers (text mesh and binary scene graph)

pub mod obj;
pub mod scene;

pub use obj::{NormalIndexing, ObjWriter};
pub use scene::{MeshId, NodeId, SceneExporter, SceneSink, SceneSinkError};

use std::path::Path;

/// Detect asset format from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    /// Text mesh format (`v`/`vn`/`f` lines)
    Obj,
    /// Binary scene-graph format
    Scene,
    Unknown,
}

impl AssetFormat {
    /// Detect format from a file path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("obj") => AssetFormat::Obj,
            Some("fbx") => AssetFormat::Scene,
            _ => AssetFormat::Unknown,
        }
    }

    /// Check if the format is supported
    pub fn is_supported(&self) -> bool {
        matches!(self, AssetFormat::Obj | AssetFormat::Scene)
    }

    /// Get format name
    pub fn name(&self) -> &'static str {
        match self {
            AssetFormat::Obj => "OBJ",
            AssetFormat::Scene => "FBX scene",
            AssetFormat::Unknown => "Unknown",
        }
    }
}
