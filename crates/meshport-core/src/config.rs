//! Tessellation configuration

use serde::{Deserialize, Serialize};

/// How the CAD tree is turned into mesh data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TessellationMode {
    /// Walk the tree recursively, one MeshNode per document node
    #[default]
    Recursive,
    /// Sample one flat mesh per root object, ignoring hierarchy
    SingleBody,
}

/// Tessellation parameters for one export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TessellationConfig {
    /// Global tessellation density for the recursive path; per-node
    /// overrides take precedence
    #[serde(default = "default_density")]
    pub density: f32,
    /// Maximum linear surface deviation for single-body sampling
    #[serde(default = "default_linear_deflection")]
    pub linear_deflection: f32,
    /// Maximum angular surface deviation (radians) for single-body sampling
    #[serde(default = "default_angular_deflection")]
    pub angular_deflection: f32,
    #[serde(default)]
    pub mode: TessellationMode,
    /// Re-center each node's origin on its vertex centroid
    #[serde(default = "default_center_pivot")]
    pub center_pivot: bool,
}

fn default_density() -> f32 {
    1.0
}

fn default_linear_deflection() -> f32 {
    0.1
}

fn default_angular_deflection() -> f32 {
    0.523599 // 30 degrees
}

fn default_center_pivot() -> bool {
    true
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            linear_deflection: default_linear_deflection(),
            angular_deflection: default_angular_deflection(),
            mode: TessellationMode::default(),
            center_pivot: default_center_pivot(),
        }
    }
}
