// src/lib.rs
//! Mesh Line
//!
//! Constant screen-width thick lines for wgpu: ribbon vertex streams built from
//! polylines, in-place streaming for trails, and ray picking.

pub mod error;
pub mod gfx;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use error::{MeshLineError, Result};
pub use gfx::geometry::MeshLine;
