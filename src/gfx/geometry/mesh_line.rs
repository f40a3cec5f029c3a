//! # Mesh Line
//!
//! Builds and maintains the ribbon vertex streams for a single polyline.

use std::fmt;

use cgmath::Point3;

use super::{BufferAttribute, GeometryProvider};
use crate::error::{MeshLineError, Result};
use crate::gfx::picking::{BoundingSphere, AABB};

/// Maximum path length: two vertices per point must stay addressable by `u16` indices
pub const MAX_POINTS: usize = (u16::MAX as usize + 1) / 2;

/// Maps the normalized path parameter `t` to a width multiplier
pub type WidthCallback = Box<dyn Fn(f32) -> f32>;

/// How the first and last path points are compared to decide whether the
/// path is a closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ClosureTest {
    /// Exactly equal coordinates (`==`, no tolerance)
    #[default]
    Exact,
    /// Every coordinate within the given absolute tolerance
    Tolerance(f32),
}

impl ClosureTest {
    /// Whether a path running from `first` to `last` closes on itself
    pub fn is_closed(&self, first: Point3<f32>, last: Point3<f32>) -> bool {
        match *self {
            ClosureTest::Exact => first == last,
            ClosureTest::Tolerance(eps) => {
                (first.x - last.x).abs() <= eps
                    && (first.y - last.y).abs() <= eps
                    && (first.z - last.z).abs() <= eps
            }
        }
    }

    fn is_closed_path(&self, path: &[Point3<f32>]) -> bool {
        // A single point has no distinct neighbour to wrap around to
        path.len() >= 2 && self.is_closed(path[0], path[path.len() - 1])
    }
}

/// Build options for a [`MeshLine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshLineOptions {
    pub closure: ClosureTest,
}

impl MeshLineOptions {
    pub fn with_closure(mut self, closure: ClosureTest) -> Self {
        self.closure = closure;
        self
    }
}

/// Freshly computed line buffers, before they are copied into GPU-facing storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineData {
    pub position: Vec<f32>,
    pub previous: Vec<f32>,
    pub next: Vec<f32>,
    pub side: Vec<f32>,
    pub width: Vec<f32>,
    pub uv: Vec<f32>,
    pub counters: Vec<f32>,
    pub index: Vec<u16>,
    /// Whether the path was treated as a closed loop
    pub closed: bool,
}

impl LineData {
    /// Number of output vertices (two per path point)
    pub fn vertex_count(&self) -> usize {
        self.side.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.index.len() / 3
    }
}

fn push_rails(dst: &mut Vec<f32>, p: Point3<f32>) {
    dst.extend_from_slice(&[p.x, p.y, p.z, p.x, p.y, p.z]);
}

fn write_rails(dst: &mut [f32], p: Point3<f32>) {
    dst.copy_from_slice(&[p.x, p.y, p.z, p.x, p.y, p.z]);
}

/// Compute every ribbon stream for `path`.
///
/// `width` is evaluated once per path point with `t = i / (N - 1)` (or `0`
/// for a single point); without it every width is `1`. The parametrization
/// is not clamped. An empty path yields empty buffers.
pub fn build_line_data(
    path: &[Point3<f32>],
    width: Option<&dyn Fn(f32) -> f32>,
    closure: ClosureTest,
) -> LineData {
    let n = path.len();
    if n == 0 {
        return LineData::default();
    }

    let closed = closure.is_closed_path(path);
    let last = n - 1;
    let span = if n > 1 { last as f32 } else { 1.0 };

    let mut data = LineData {
        position: Vec::with_capacity(n * 6),
        previous: Vec::with_capacity(n * 6),
        next: Vec::with_capacity(n * 6),
        side: Vec::with_capacity(n * 2),
        width: Vec::with_capacity(n * 2),
        uv: Vec::with_capacity(n * 4),
        counters: Vec::with_capacity(n * 2),
        index: Vec::with_capacity(last * 6),
        closed,
    };

    for (j, &point) in path.iter().enumerate() {
        let t = j as f32 / span;
        let c = j as f32 / n as f32;

        push_rails(&mut data.position, point);
        data.counters.extend_from_slice(&[c, c]);
        data.side.extend_from_slice(&[1.0, -1.0]);

        let w = width.map_or(1.0, |f| f(t));
        data.width.extend_from_slice(&[w, w]);

        data.uv.extend_from_slice(&[t, 0.0, t, 1.0]);

        let prev = match j {
            0 if closed => path[n - 2],
            0 => path[0],
            _ => path[j - 1],
        };
        push_rails(&mut data.previous, prev);

        let next = match j {
            j if j == last && closed => path[1],
            j if j == last => path[last],
            _ => path[j + 1],
        };
        push_rails(&mut data.next, next);

        if j < last {
            // Indices stay below 2 * MAX_POINTS, checked by the caller
            let i = (j * 2) as u16;
            data.index.extend_from_slice(&[i, i + 1, i + 2, i + 2, i + 1, i + 3]);
        }
    }

    data
}

/// The seven vertex streams plus the index stream of a line
#[derive(Debug, Clone)]
pub struct LineAttributes {
    pub position: BufferAttribute<f32>,
    pub previous: BufferAttribute<f32>,
    pub next: BufferAttribute<f32>,
    pub side: BufferAttribute<f32>,
    pub width: BufferAttribute<f32>,
    pub uv: BufferAttribute<f32>,
    pub counters: BufferAttribute<f32>,
    pub index: BufferAttribute<u16>,
}

impl LineAttributes {
    fn new() -> Self {
        Self {
            position: BufferAttribute::new("position", 3),
            previous: BufferAttribute::new("previous", 3),
            next: BufferAttribute::new("next", 3),
            side: BufferAttribute::new("side", 1),
            width: BufferAttribute::new("width", 1),
            uv: BufferAttribute::new("uv", 2),
            counters: BufferAttribute::new("counters", 1),
            index: BufferAttribute::new("index", 1),
        }
    }

    /// Copy `data` into the streams, returns how many streams were reused in place
    fn assign(&mut self, data: &LineData) -> usize {
        [
            self.position.copy_array(&data.position),
            self.previous.copy_array(&data.previous),
            self.next.copy_array(&data.next),
            self.side.copy_array(&data.side),
            self.width.copy_array(&data.width),
            self.uv.copy_array(&data.uv),
            self.counters.copy_array(&data.counters),
            self.index.copy_array(&data.index),
        ]
        .into_iter()
        .filter(|reused| *reused)
        .count()
    }
}

/// A polyline rendered as a constant screen-width ribbon.
///
/// Owns the path, the optional width callback and all derived vertex
/// streams. Not meant to be shared between threads; callers serialize
/// builds, advances and raycasts on one instance.
pub struct MeshLine {
    points: Vec<Point3<f32>>,
    width_callback: Option<WidthCallback>,
    options: MeshLineOptions,
    attributes: LineAttributes,
    bounding_box: Option<AABB>,
    bounding_sphere: Option<BoundingSphere>,
    closed: bool,
}

impl fmt::Debug for MeshLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshLine")
            .field("points", &self.points.len())
            .field("has_width_callback", &self.width_callback.is_some())
            .field("options", &self.options)
            .field("closed", &self.closed)
            .field("bounding_sphere", &self.bounding_sphere)
            .finish()
    }
}

impl Default for MeshLine {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshLine {
    /// Create an empty line with default options
    pub fn new() -> Self {
        Self::with_options(MeshLineOptions::default())
    }

    pub fn with_options(options: MeshLineOptions) -> Self {
        Self {
            points: Vec::new(),
            width_callback: None,
            options,
            attributes: LineAttributes::new(),
            bounding_box: None,
            bounding_sphere: None,
            closed: false,
        }
    }

    /// Create and build a line in one go
    pub fn from_points(points: &[Point3<f32>], width: Option<WidthCallback>) -> Result<Self> {
        let mut line = Self::new();
        line.build_from_points(points, width)?;
        Ok(line)
    }

    /// Rebuild every stream from a list of points.
    ///
    /// Passing `None` for `width` keeps the previously installed callback.
    /// Streams whose length does not change are overwritten in place.
    pub fn build_from_points(
        &mut self,
        points: &[Point3<f32>],
        width: Option<WidthCallback>,
    ) -> Result<()> {
        validate_len(points.len())?;
        if let Some(callback) = width {
            self.width_callback = Some(callback);
        }
        self.points.clear();
        self.points.extend_from_slice(points);
        self.process();
        Ok(())
    }

    /// Rebuild every stream from interleaved `x, y, z` coordinates
    pub fn build_from_flat_array(&mut self, array: &[f32], width: Option<WidthCallback>) -> Result<()> {
        if array.len() % 3 != 0 {
            log::warn!("Rejected flat line array of length {}", array.len());
            return Err(MeshLineError::MalformedFlatArray(array.len()));
        }
        let points: Vec<Point3<f32>> = array
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        self.build_from_points(&points, width)
    }

    /// Rebuild from the current path, e.g. after changing the width callback
    pub fn rebuild(&mut self) -> Result<()> {
        if self.points.is_empty() {
            return Err(MeshLineError::NotBuilt);
        }
        self.process();
        Ok(())
    }

    /// Install a width callback for the next build. Does not rebuild.
    pub fn set_width_callback(&mut self, callback: Option<WidthCallback>) {
        self.width_callback = callback;
    }

    /// Change build options for the next build. Does not rebuild.
    pub fn set_options(&mut self, options: MeshLineOptions) {
        self.options = options;
    }

    pub fn options(&self) -> MeshLineOptions {
        self.options
    }

    /// Drop the oldest point and append `point`, keeping the point count.
    ///
    /// Shifts `position`, `previous` and `next` in place without
    /// reallocating and leaves them exactly as a full rebuild on the shifted
    /// path would. `side`, `width`, `uv`, `counters`, the index stream and the
    /// bounding volumes are left untouched, so bounds go stale under
    /// streaming use.
    pub fn advance(&mut self, point: Point3<f32>) -> Result<()> {
        let n = self.points.len();
        if n == 0 {
            return Err(MeshLineError::NotBuilt);
        }

        self.points.rotate_left(1);
        self.points[n - 1] = point;

        let LineAttributes {
            position,
            previous,
            next,
            ..
        } = &mut self.attributes;
        let l = position.array().len();
        debug_assert_eq!(l, n * 6);

        previous.array_mut().copy_from_slice(position.array());

        let pos = position.array_mut();
        pos.copy_within(6.., 0);
        write_rails(&mut pos[l - 6..], point);

        next.array_mut()[..l - 6].copy_from_slice(&position.array()[6..]);
        write_rails(&mut next.array_mut()[l - 6..], point);

        // Boundary neighbours follow the same closure rule as a full build
        let closed = self.options.closure.is_closed_path(&self.points);
        let head = if closed { self.points[n - 2] } else { self.points[0] };
        let tail = if closed { self.points[1] } else { self.points[n - 1] };
        write_rails(&mut previous.array_mut()[..6], head);
        write_rails(&mut next.array_mut()[l - 6..], tail);
        self.closed = closed;

        position.mark_dirty();
        previous.mark_dirty();
        next.mark_dirty();

        log::trace!("Advanced line of {} points", n);
        Ok(())
    }

    fn process(&mut self) {
        let data = build_line_data(
            &self.points,
            self.width_callback.as_deref(),
            self.options.closure,
        );
        let reused = self.attributes.assign(&data);
        self.closed = data.closed;

        let aabb = AABB::from_flat(&data.position);
        self.bounding_sphere = Some(BoundingSphere::from_flat(&data.position, &aabb));
        self.bounding_box = Some(aabb);

        log::debug!(
            "Built line: {} points, {} triangles, closed: {}, {}/8 streams reused",
            self.points.len(),
            data.triangle_count(),
            data.closed,
            reused
        );
    }

    /// The current path, including points streamed in by [`advance`](Self::advance)
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the last build or advance treated the path as a closed loop
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn line_attributes(&self) -> &LineAttributes {
        &self.attributes
    }

    pub fn position(&self) -> &[f32] {
        self.attributes.position.array()
    }

    pub fn previous(&self) -> &[f32] {
        self.attributes.previous.array()
    }

    pub fn next(&self) -> &[f32] {
        self.attributes.next.array()
    }

    pub fn side(&self) -> &[f32] {
        self.attributes.side.array()
    }

    pub fn width(&self) -> &[f32] {
        self.attributes.width.array()
    }

    pub fn uv(&self) -> &[f32] {
        self.attributes.uv.array()
    }

    pub fn counters(&self) -> &[f32] {
        self.attributes.counters.array()
    }

    pub fn indices(&self) -> &[u16] {
        self.attributes.index.array()
    }
}

fn validate_len(points: usize) -> Result<()> {
    if points == 0 {
        log::warn!("Rejected empty line path");
        return Err(MeshLineError::EmptyPath);
    }
    if points > MAX_POINTS {
        log::warn!("Rejected line path of {} points", points);
        return Err(MeshLineError::TooManyVertices {
            points,
            max: MAX_POINTS,
        });
    }
    Ok(())
}

impl GeometryProvider for MeshLine {
    fn attributes(&self) -> Vec<&BufferAttribute<f32>> {
        let a = &self.attributes;
        vec![
            &a.position,
            &a.previous,
            &a.next,
            &a.side,
            &a.width,
            &a.uv,
            &a.counters,
        ]
    }

    fn attributes_mut(&mut self) -> Vec<&mut BufferAttribute<f32>> {
        let a = &mut self.attributes;
        vec![
            &mut a.position,
            &mut a.previous,
            &mut a.next,
            &mut a.side,
            &mut a.width,
            &mut a.uv,
            &mut a.counters,
        ]
    }

    fn index(&self) -> &BufferAttribute<u16> {
        &self.attributes.index
    }

    fn index_mut(&mut self) -> &mut BufferAttribute<u16> {
        &mut self.attributes.index
    }

    fn bounding_box(&self) -> Option<AABB> {
        self.bounding_box
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounding_sphere
    }
}
