//! # Thick Line Geometry
//!
//! This module turns polylines into the vertex data needed to draw them as
//! camera-facing ribbons of constant screen-space width.
//!
//! Every path point is expanded into two vertices (a "top" and a "bottom"
//! rail). The vertex shader pushes the rails apart along the screen-space
//! normal it derives from the `previous` and `next` neighbour streams, so the
//! CPU never has to touch the buffers again while the camera moves.
//!
//! ## Attribute Streams
//!
//! | Stream     | Components | Contents                                   |
//! |------------|------------|--------------------------------------------|
//! | `position` | 3          | path point, duplicated per rail            |
//! | `previous` | 3          | preceding path point                       |
//! | `next`     | 3          | following path point                       |
//! | `side`     | 1          | `+1` top rail, `-1` bottom rail            |
//! | `width`    | 1          | width multiplier from the width callback   |
//! | `uv`       | 2          | `(t, 0)` / `(t, 1)` with `t = i / (N - 1)` |
//! | `counters` | 1          | `i / N`                                    |
//!
//! plus a 16-bit `index` stream with two triangles per path segment.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use meshline::gfx::geometry::MeshLine;
//!
//! let mut line = MeshLine::new();
//! line.build_from_points(
//!     &[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
//!     Some(Box::new(|t: f32| 1.0 - t)),
//! )
//! .unwrap();
//!
//! // Stream a new point into the trail, dropping the oldest one
//! line.advance(Point3::new(2.0, 0.0, 0.0)).unwrap();
//! ```

pub mod mesh_line;

pub use mesh_line::*;

use crate::gfx::picking::{BoundingSphere, AABB};

/// A named, flat numeric vertex stream with a dirty flag.
///
/// The owning geometry is the only writer. Whoever uploads the stream to the
/// GPU reads [`array`](Self::array) when [`needs_update`](Self::needs_update)
/// is set and calls [`clear_update`](Self::clear_update) afterwards.
///
/// `version` counts content changes. `generation` only changes when the
/// backing storage was reallocated because the element count changed, which
/// tells the GPU side to recreate its buffer instead of writing into it.
#[derive(Debug, Clone)]
pub struct BufferAttribute<T> {
    name: &'static str,
    item_size: usize,
    array: Vec<T>,
    needs_update: bool,
    version: u32,
    generation: u32,
}

impl<T: Copy> BufferAttribute<T> {
    /// Create an empty stream with `item_size` components per vertex
    pub fn new(name: &'static str, item_size: usize) -> Self {
        Self {
            name,
            item_size,
            array: Vec::new(),
            needs_update: false,
            version: 0,
            generation: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of components per vertex
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Number of vertices (or indices) held in the stream
    pub fn count(&self) -> usize {
        self.array.len() / self.item_size
    }

    pub fn array(&self) -> &[T] {
        &self.array
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Replace the stream contents.
    ///
    /// Storage is overwritten in place when `src` has the same length as the
    /// current contents, otherwise it is reallocated. Returns `true` for the
    /// in-place case.
    pub fn copy_array(&mut self, src: &[T]) -> bool {
        let in_place = self.array.len() == src.len() && self.generation > 0;
        if in_place {
            self.array.copy_from_slice(src);
        } else {
            self.array = src.to_vec();
            self.generation = self.generation.wrapping_add(1);
        }
        self.mark_dirty();
        in_place
    }

    /// Mutable view for in-place edits. Callers must [`mark_dirty`](Self::mark_dirty).
    pub(crate) fn array_mut(&mut self) -> &mut [T] {
        &mut self.array
    }

    pub fn mark_dirty(&mut self) {
        self.needs_update = true;
        self.version = self.version.wrapping_add(1);
    }

    /// Called by the upload side once the contents reached the GPU
    pub fn clear_update(&mut self) {
        self.needs_update = false;
    }
}

/// Interface between line geometry and whatever renders it.
///
/// Exposes the float vertex streams in shader location order, the index
/// stream, and the bounding volumes used for culling and pick rejection.
pub trait GeometryProvider {
    /// Vertex streams in shader location order
    fn attributes(&self) -> Vec<&BufferAttribute<f32>>;

    fn attributes_mut(&mut self) -> Vec<&mut BufferAttribute<f32>>;

    fn index(&self) -> &BufferAttribute<u16>;

    fn index_mut(&mut self) -> &mut BufferAttribute<u16>;

    fn bounding_box(&self) -> Option<AABB>;

    fn bounding_sphere(&self) -> Option<BoundingSphere>;

    /// Look up a vertex stream by name
    fn attribute(&self, name: &str) -> Option<&BufferAttribute<f32>> {
        self.attributes().into_iter().find(|a| a.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_array_reuses_storage_on_equal_length() {
        let mut attr = BufferAttribute::<f32>::new("side", 1);
        assert!(!attr.copy_array(&[1.0, -1.0]));
        assert_eq!(attr.generation(), 1);
        assert!(attr.needs_update());

        attr.clear_update();
        let ptr = attr.array().as_ptr();
        assert!(attr.copy_array(&[-1.0, 1.0]));
        assert_eq!(attr.array().as_ptr(), ptr);
        assert_eq!(attr.generation(), 1);
        assert_eq!(attr.version(), 2);
        assert!(attr.needs_update());
    }

    #[test]
    fn test_copy_array_reallocates_on_length_change() {
        let mut attr = BufferAttribute::<f32>::new("uv", 2);
        attr.copy_array(&[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(attr.count(), 2);

        attr.copy_array(&[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
        assert_eq!(attr.count(), 4);
        assert_eq!(attr.generation(), 2);
    }

    #[test]
    fn test_first_copy_counts_as_allocation_even_when_empty() {
        let mut attr = BufferAttribute::<u16>::new("index", 1);
        assert!(!attr.copy_array(&[]));
        assert_eq!(attr.generation(), 1);
    }
}
