//! Error types for line geometry construction

use thiserror::Error;

/// Errors raised when a [`MeshLine`](crate::gfx::geometry::MeshLine) is fed
/// input it cannot turn into geometry.
///
/// These are caller contract violations. A failed call leaves the previously
/// built geometry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshLineError {
    /// The path contained no points.
    #[error("cannot build a line from an empty path")]
    EmptyPath,

    /// A flat coordinate array whose length is not a multiple of three.
    #[error("flat position array has {0} values, expected a multiple of 3")]
    MalformedFlatArray(usize),

    /// The doubled vertex count does not fit a 16-bit index buffer.
    #[error("path has {points} points, at most {max} fit a 16-bit index buffer")]
    TooManyVertices { points: usize, max: usize },

    /// `advance` was called before any geometry was built.
    #[error("line geometry has not been built yet")]
    NotBuilt,
}

pub type Result<T> = std::result::Result<T, MeshLineError>;
