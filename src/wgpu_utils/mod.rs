// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Uploads line geometry streams into wgpu buffers and binds them for drawing.

pub mod line_buffers;

// Re-export main types
pub use line_buffers::{DrawMeshLine, LineGpuBuffers};
