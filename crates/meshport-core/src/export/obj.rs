//! Text mesh writer
//!
//! Line-oriented output with no header or footer: one `v` line per vertex,
//! one `vn` line per normal, one `f` line per face with 1-based `v//vn`
//! references. The target viewer convention is Y-up while documents are
//! Z-up, so every emitted position and normal has its Y and Z components
//! swapped. The swap is a fixed policy of this writer, not an option, and
//! applies to vertices and normals together.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::buffers::SceneBuffers;
use crate::error::ExportError;

/// How faces reference normals in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NormalIndexing {
    /// One `vn` per face, referenced by all three corners
    #[default]
    PerFace,
    /// Three `vn` copies per face, each corner referencing its own
    PerCorner,
}

/// Writer for the text mesh format
#[derive(Debug, Clone, Default)]
pub struct ObjWriter {
    pub normal_indexing: NormalIndexing,
}

impl ObjWriter {
    /// Create a writer with the default per-face normal indexing
    pub fn new() -> Self {
        Self::default()
    }

    /// Write merged buffers to any output stream
    pub fn write(&self, out: &mut impl Write, buffers: &SceneBuffers) -> io::Result<()> {
        for v in &buffers.vertices {
            write_swapped(out, "v", *v)?;
        }

        match self.normal_indexing {
            NormalIndexing::PerFace => {
                for n in &buffers.normals {
                    write_swapped(out, "vn", *n)?;
                }
                for (i, face) in buffers.faces.iter().enumerate() {
                    let k = i + 1;
                    writeln!(
                        out,
                        "f {}//{} {}//{} {}//{}",
                        face[0] + 1,
                        k,
                        face[1] + 1,
                        k,
                        face[2] + 1,
                        k
                    )?;
                }
            }
            NormalIndexing::PerCorner => {
                for n in &buffers.normals {
                    for _ in 0..3 {
                        write_swapped(out, "vn", *n)?;
                    }
                }
                for (i, face) in buffers.faces.iter().enumerate() {
                    let k = i * 3 + 1;
                    writeln!(
                        out,
                        "f {}//{} {}//{} {}//{}",
                        face[0] + 1,
                        k,
                        face[1] + 1,
                        k + 1,
                        face[2] + 1,
                        k + 2
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Write merged buffers to a file
    pub fn save(&self, path: &Path, buffers: &SceneBuffers) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|e| ExportError::Output(e.to_string()))?;
        let mut out = BufWriter::new(file);
        self.write(&mut out, buffers)
            .and_then(|_| out.flush())
            .map_err(|e| ExportError::Output(e.to_string()))?;

        tracing::info!("Wrote {} triangles to {:?}", buffers.triangle_count(), path);
        Ok(())
    }
}

/// Emit one `v`/`vn` line with the Y/Z axis swap applied
fn write_swapped(out: &mut impl Write, tag: &str, v: Vec3) -> io::Result<()> {
    writeln!(out, "{} {} {} {}", tag, v.x, v.z, v.y)
}
