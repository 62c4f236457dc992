//! Meshport Core Pipeline
//!
//! This crate turns an opened CAD document into exportable polygon data:
//! - MeshNode: tessellated scene graph node (local vertices, face normals)
//! - Tessellator: CAD tree walk producing MeshNodes and merge buffers
//! - SceneBuffers: single merged vertex/index/normal view of a scene
//! - export: text mesh (OBJ-style) writer and binary scene-graph driver
//! - pipeline: one-shot document-to-file export orchestration

pub mod buffers;
pub mod config;
pub mod error;
pub mod export;
pub mod node;
pub mod pipeline;
pub mod tessellate;

mod pivot;

pub use buffers::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use node::*;
pub use pipeline::*;
pub use tessellate::*;
