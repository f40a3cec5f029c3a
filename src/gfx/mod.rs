//! # Graphics Module
//!
//! This module contains the CPU side of thick line rendering: building the
//! ribbon vertex streams for a polyline and picking the result with rays.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Path to vertex stream conversion, streaming updates
//! - **Picking** ([`picking`]) - Ray casting against the generated line geometry
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::{Matrix4, Point3, SquareMatrix, Vector3};
//! use meshline::gfx::{raycast_mesh_line, MeshLine, Ray, Raycaster, SegmentTopology};
//!
//! let mut trail = MeshLine::from_points(&[Point3::new(0.0, 0.0, 0.0); 32], None)?;
//! trail.advance(Point3::new(0.1, 0.0, 0.0))?;
//!
//! let raycaster = Raycaster::new(Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::unit_z()));
//! let hits = raycast_mesh_line(&trail, &raycaster, &Matrix4::identity(), 1.0, SegmentTopology::Strip);
//! # Ok::<(), meshline::MeshLineError>(())
//! ```

pub mod geometry;
pub mod picking;

// Re-export commonly used types
pub use geometry::{GeometryProvider, MeshLine, MeshLineOptions};
pub use picking::{raycast_mesh_line, LineHit, Ray, Raycaster, SegmentTopology};
