//! # Mesh Line Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use meshline::prelude::*;
//!
//! let line = MeshLine::from_points(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)], None);
//! assert!(line.is_ok());
//! ```

// Re-export line geometry
pub use crate::gfx::geometry::{
    build_line_data, ClosureTest, GeometryProvider, LineData, MeshLine, MeshLineOptions,
    WidthCallback,
};

// Re-export picking
pub use crate::gfx::picking::{
    raycast_mesh_line, HitPolicy, LineHit, Ray, Raycaster, SegmentTopology,
};

// Re-export GPU helpers
pub use crate::wgpu_utils::{DrawMeshLine, LineGpuBuffers};

pub use crate::error::{MeshLineError, Result};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Vector3};
