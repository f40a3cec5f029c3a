//! # Line Picking System
//!
//! This module provides ray-casting against thick lines so they can be
//! selected with the mouse just like solid geometry.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Convert mouse coordinates to a 3D ray in world space
//! 2. **Bounding Sphere**: Reject the line early if the ray misses its sphere
//! 3. **Segments**: Walk the index stream pairwise and measure the ray's
//!    distance to every segment, widened by the line width at that vertex
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Matrix4, Point3, SquareMatrix, Vector3};
//! use meshline::gfx::geometry::MeshLine;
//! use meshline::gfx::picking::{raycast_mesh_line, Ray, Raycaster, SegmentTopology};
//!
//! let line = MeshLine::from_points(
//!     &[Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)],
//!     None,
//! )
//! .unwrap();
//!
//! let raycaster = Raycaster::new(Ray::new(
//!     Point3::new(1.0, 0.0, 5.0),
//!     Vector3::new(0.0, 0.0, -1.0),
//! ))
//! .with_line_threshold(0.1);
//!
//! let hits = raycast_mesh_line(&line, &raycaster, &Matrix4::identity(), 1.0, SegmentTopology::Strip);
//! assert_eq!(hits.len(), 1);
//! ```

use cgmath::{
    EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Transform, Vector3, Vector4, Zero,
};

use crate::gfx::geometry::GeometryProvider;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Point3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

/// Closest approach between a ray and a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentApproach {
    pub distance_sq: f32,
    pub point_on_ray: Point3<f32>,
    pub point_on_segment: Point3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Move the ray into the space described by `matrix`
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        Self::new(
            matrix.transform_point(self.origin),
            matrix.transform_vector(self.direction),
        )
    }

    /// Distance along the ray to the first sphere intersection, or `None` on a miss.
    ///
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<f32> {
        let to_center = sphere.center - self.origin;
        let tca = to_center.dot(self.direction);
        let d2 = to_center.magnitude2() - tca * tca;
        let radius2 = sphere.radius * sphere.radius;

        if d2 > radius2 {
            return None;
        }

        let thc = (radius2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;

        if t1 < 0.0 {
            None
        } else if t0 < 0.0 {
            Some(t1)
        } else {
            Some(t0)
        }
    }

    /// Squared distance between the ray and the segment `v0..v1`, with the
    /// closest points on both.
    ///
    /// Zero-length segments degrade to a ray/point query.
    pub fn distance_sq_to_segment(&self, v0: Point3<f32>, v1: Point3<f32>) -> SegmentApproach {
        let seg_center = v0.midpoint(v1);
        let seg_vec = v1 - v0;
        let seg_len = seg_vec.magnitude();
        let seg_dir = if seg_len > 0.0 {
            seg_vec / seg_len
        } else {
            Vector3::zero()
        };
        let seg_extent = seg_len * 0.5;
        let diff = self.origin - seg_center;

        let a01 = -self.direction.dot(seg_dir);
        let b0 = diff.dot(self.direction);
        let b1 = -diff.dot(seg_dir);
        let c = diff.magnitude2();
        let det = (1.0 - a01 * a01).abs();

        let (s0, s1, distance_sq);

        if det > 0.0 {
            // Ray and segment are not parallel
            let mut r0 = a01 * b1 - b0;
            let mut r1 = a01 * b0 - b1;
            let ext_det = seg_extent * det;

            if r0 >= 0.0 {
                if r1 >= -ext_det {
                    if r1 <= ext_det {
                        // Closest points are interior to both
                        let inv_det = 1.0 / det;
                        r0 *= inv_det;
                        r1 *= inv_det;
                        distance_sq = r0 * (r0 + a01 * r1 + 2.0 * b0)
                            + r1 * (a01 * r0 + r1 + 2.0 * b1)
                            + c;
                    } else {
                        r1 = seg_extent;
                        r0 = (-(a01 * r1 + b0)).max(0.0);
                        distance_sq = -r0 * r0 + r1 * (r1 + 2.0 * b1) + c;
                    }
                } else {
                    r1 = -seg_extent;
                    r0 = (-(a01 * r1 + b0)).max(0.0);
                    distance_sq = -r0 * r0 + r1 * (r1 + 2.0 * b1) + c;
                }
            } else if r1 <= -ext_det {
                r0 = (-(-a01 * seg_extent + b0)).max(0.0);
                r1 = if r0 > 0.0 {
                    -seg_extent
                } else {
                    (-b1).clamp(-seg_extent, seg_extent)
                };
                distance_sq = -r0 * r0 + r1 * (r1 + 2.0 * b1) + c;
            } else if r1 <= ext_det {
                r0 = 0.0;
                r1 = (-b1).clamp(-seg_extent, seg_extent);
                distance_sq = r1 * (r1 + 2.0 * b1) + c;
            } else {
                r0 = (-(a01 * seg_extent + b0)).max(0.0);
                r1 = if r0 > 0.0 {
                    seg_extent
                } else {
                    (-b1).clamp(-seg_extent, seg_extent)
                };
                distance_sq = -r0 * r0 + r1 * (r1 + 2.0 * b1) + c;
            }
            s0 = r0;
            s1 = r1;
        } else {
            // Parallel
            s1 = if a01 > 0.0 { -seg_extent } else { seg_extent };
            s0 = (-(a01 * s1 + b0)).max(0.0);
            distance_sq = -s0 * s0 + s1 * (s1 + 2.0 * b1) + c;
        }

        SegmentApproach {
            distance_sq: distance_sq.max(0.0),
            point_on_ray: self.point_at(s0),
            point_on_segment: seg_center + seg_dir * s1,
        }
    }
}

/// Axis-aligned bounding box
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Point3<f32>,
    /// Maximum corner of the bounding box
    pub max: Point3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from interleaved `x, y, z` coordinates
    pub fn from_flat(positions: &[f32]) -> Self {
        let mut chunks = positions.chunks_exact(3);
        let Some(first) = chunks.next() else {
            return Self::new(Point3::origin(), Point3::origin());
        };

        let mut min = Point3::new(first[0], first[1], first[2]);
        let mut max = min;

        for v in chunks {
            min.x = min.x.min(v[0]);
            min.y = min.y.min(v[1]);
            min.z = min.z.min(v[2]);
            max.x = max.x.max(v[0]);
            max.y = max.y.max(v[1]);
            max.z = max.z.max(v[2]);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Point3<f32> {
        self.min.midpoint(self.max)
    }
}

/// Bounding sphere used for cheap ray rejection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere centred on `aabb` that encloses every position
    pub fn from_flat(positions: &[f32], aabb: &AABB) -> Self {
        let center = aabb.center();
        let max_sq = positions
            .chunks_exact(3)
            .map(|v| (Point3::new(v[0], v[1], v[2]) - center).magnitude2())
            .fold(0.0_f32, f32::max);

        Self::new(center, max_sq.sqrt())
    }

    /// Apply a transformation matrix, scaling the radius by the largest axis scale
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let max_scale = [matrix.x, matrix.y, matrix.z]
            .iter()
            .map(|axis| axis.truncate().magnitude())
            .fold(0.0_f32, f32::max);

        Self::new(matrix.transform_point(self.center), self.radius * max_scale)
    }
}

/// How consecutive index pairs map to line segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentTopology {
    /// Continuous ribbon: every consecutive index pair is tested
    #[default]
    Strip,
    /// Disjoint segment list: indices come in independent pairs
    Segments,
}

impl SegmentTopology {
    pub fn stride(&self) -> usize {
        match self {
            SegmentTopology::Strip => 1,
            SegmentTopology::Segments => 2,
        }
    }

    /// Index stream entries per path segment
    fn indices_per_segment(&self) -> usize {
        match self {
            SegmentTopology::Strip => 6,
            SegmentTopology::Segments => 2,
        }
    }
}

/// Which hit a raycast reports when several segments qualify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPolicy {
    /// Stop at the first qualifying segment in index order
    #[default]
    First,
    /// Test every segment and keep the closest hit
    Nearest,
}

/// World-space pick query
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    pub ray: Ray,
    /// Hits closer than this are ignored
    pub near: f32,
    /// Hits farther than this are ignored
    pub far: f32,
    /// Extra pick tolerance added to half the line width
    pub line_threshold: f32,
    pub policy: HitPolicy,
}

impl Raycaster {
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            near: 0.0,
            far: f32::INFINITY,
            line_threshold: 1.0,
            policy: HitPolicy::First,
        }
    }

    /// Build a ray through a screen position from an inverse-able view projection matrix.
    ///
    /// Returns `None` when the matrix cannot be inverted.
    pub fn from_screen(
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        view_proj: &Matrix4<f32>,
    ) -> Option<Self> {
        let (mouse_x, mouse_y) = screen_pos;
        let (screen_width, screen_height) = screen_size;

        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

        let inv_view_proj = view_proj.invert()?;

        let unproject = |ndc_z: f32| {
            let world = inv_view_proj * Vector4::new(ndc_x, ndc_y, ndc_z, 1.0);
            Point3::new(world.x / world.w, world.y / world.w, world.z / world.w)
        };
        let near_3d = unproject(0.0);
        let far_3d = unproject(1.0);

        Some(Self::new(Ray::new(near_3d, far_3d - near_3d)))
    }

    pub fn with_near_far(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_line_threshold(mut self, threshold: f32) -> Self {
        self.line_threshold = threshold;
        self
    }

    pub fn with_policy(mut self, policy: HitPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Result of a line pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHit {
    /// World-space distance from the ray origin to `point_on_ray`
    pub distance: f32,
    /// Closest point on the segment, world space
    pub point: Point3<f32>,
    /// Closest point on the ray, world space
    pub point_on_ray: Point3<f32>,
    /// Position in the index stream of the first index of the hit pair
    pub index: usize,
    /// Path segment the hit pair belongs to
    pub segment: usize,
}

/// Borrowed view of the streams a raycast needs
#[derive(Debug, Clone, Copy)]
pub struct LineSegmentsView<'a> {
    pub indices: &'a [u16],
    pub positions: &'a [f32],
    pub widths: &'a [f32],
}

fn point_from(positions: &[f32], vertex: usize) -> Option<Point3<f32>> {
    let v = positions.get(vertex * 3..vertex * 3 + 3)?;
    Some(Point3::new(v[0], v[1], v[2]))
}

/// Test a local-space ray against every index pair of `view`.
///
/// `raycaster` supplies the world-space origin, near/far range, threshold and
/// hit policy; `matrix_world` moves local results back into world space.
/// The width lookup `widths[i / 3]` mirrors the two-triangles-per-segment
/// index layout of [`MeshLine`](crate::gfx::geometry::MeshLine); missing widths
/// count as `1`.
pub fn intersect_segments(
    ray_local: &Ray,
    view: LineSegmentsView<'_>,
    raycaster: &Raycaster,
    matrix_world: &Matrix4<f32>,
    line_width: f32,
    topology: SegmentTopology,
) -> Vec<LineHit> {
    let mut best: Option<LineHit> = None;
    let count = view.indices.len().saturating_sub(1);

    for i in (0..count).step_by(topology.stride()) {
        let a = view.indices[i] as usize;
        let b = view.indices[i + 1] as usize;
        let (Some(v_start), Some(v_end)) = (point_from(view.positions, a), point_from(view.positions, b))
        else {
            continue;
        };

        let width = view.widths.get(i / 3).copied().unwrap_or(1.0);
        let precision = raycaster.line_threshold + line_width * width / 2.0;

        let approach = ray_local.distance_sq_to_segment(v_start, v_end);
        if approach.distance_sq > precision * precision {
            continue;
        }

        // Back to world space for the distance check
        let point_on_ray = matrix_world.transform_point(approach.point_on_ray);
        let distance = (point_on_ray - raycaster.ray.origin).magnitude();
        if distance < raycaster.near || distance > raycaster.far {
            continue;
        }

        let hit = LineHit {
            distance,
            point: matrix_world.transform_point(approach.point_on_segment),
            point_on_ray,
            index: i,
            segment: i / topology.indices_per_segment(),
        };

        match raycaster.policy {
            HitPolicy::First => return vec![hit],
            HitPolicy::Nearest => {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    best = Some(hit);
                }
            }
        }
    }

    best.into_iter().collect()
}

/// Pick a line geometry with a world-space ray.
///
/// `matrix_world` is the object's local-to-world transform and `line_width`
/// the material's line width. Returns an empty list when the ray misses the
/// bounding sphere, when the transform cannot be inverted, or when no segment
/// lies within tolerance.
pub fn raycast_mesh_line<G: GeometryProvider>(
    geometry: &G,
    raycaster: &Raycaster,
    matrix_world: &Matrix4<f32>,
    line_width: f32,
    topology: SegmentTopology,
) -> Vec<LineHit> {
    let Some(sphere) = geometry.bounding_sphere() else {
        return Vec::new();
    };
    if raycaster.ray.intersect_sphere(&sphere.transform(matrix_world)).is_none() {
        log::trace!("Ray missed line bounding sphere");
        return Vec::new();
    }

    let Some(inverse) = matrix_world.invert() else {
        log::trace!("Line transform is not invertible, skipping pick");
        return Vec::new();
    };
    let ray_local = raycaster.ray.transform(&inverse);

    let (Some(positions), Some(widths)) = (geometry.attribute("position"), geometry.attribute("width"))
    else {
        return Vec::new();
    };
    let view = LineSegmentsView {
        indices: geometry.index().array(),
        positions: positions.array(),
        widths: widths.array(),
    };

    intersect_segments(&ray_local, view, raycaster, matrix_world, line_width, topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::MeshLine;

    fn p(x: f32, y: f32, z: f32) -> Point3<f32> {
        Point3::new(x, y, z)
    }

    fn straight_line() -> MeshLine {
        MeshLine::from_points(&[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)], None)
            .unwrap()
    }

    fn down_through(x: f32, y: f32) -> Raycaster {
        Raycaster::new(Ray::new(p(x, y, 5.0), Vector3::new(0.0, 0.0, -1.0)))
    }

    #[test]
    fn test_aabb_creation() {
        let aabb = AABB::from_flat(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0]);

        assert_eq!(aabb.min, p(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, p(1.0, 1.0, 1.0));
        assert_eq!(aabb.center(), p(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_sphere_intersection() {
        let sphere = BoundingSphere::new(p(0.0, 0.0, 0.0), 1.0);

        let ray = Ray::new(p(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(ray.intersect_sphere(&sphere), Some(4.0));

        let inside = Ray::new(p(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(inside.intersect_sphere(&sphere), Some(1.0));

        let behind = Ray::new(p(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(behind.intersect_sphere(&sphere).is_none());

        let ray_miss = Ray::new(p(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(ray_miss.intersect_sphere(&sphere).is_none());
    }

    #[test]
    fn test_sphere_transform_scales_radius() {
        let sphere = BoundingSphere::new(p(1.0, 0.0, 0.0), 1.0);
        let m = Matrix4::from_translation(Vector3::new(0.0, 3.0, 0.0))
            * Matrix4::from_nonuniform_scale(2.0, 1.0, 3.0);
        let world = sphere.transform(&m);
        assert_eq!(world.center, p(2.0, 3.0, 0.0));
        assert_eq!(world.radius, 3.0);
    }

    #[test]
    fn test_ray_segment_distance() {
        let ray = Ray::new(p(1.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));

        let crossing = ray.distance_sq_to_segment(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        assert_eq!(crossing.distance_sq, 0.0);
        assert_eq!(crossing.point_on_ray, p(1.0, 0.0, 0.0));
        assert_eq!(crossing.point_on_segment, p(1.0, 0.0, 0.0));

        // Closest point clamps to the segment end
        let beside = ray.distance_sq_to_segment(p(-3.0, 0.0, 0.0), p(-1.0, 0.0, 0.0));
        assert_eq!(beside.distance_sq, 4.0);
        assert_eq!(beside.point_on_segment, p(-1.0, 0.0, 0.0));

        // Zero-length segment behaves like a point
        let point = ray.distance_sq_to_segment(p(1.0, 2.0, 0.0), p(1.0, 2.0, 0.0));
        assert_eq!(point.distance_sq, 4.0);
        assert_eq!(point.point_on_ray, p(1.0, 0.0, 0.0));

        // Parallel segment
        let parallel = ray.distance_sq_to_segment(p(1.0, 3.0, 1.0), p(1.0, 3.0, 2.0));
        assert_eq!(parallel.distance_sq, 9.0);

        // Segment behind the origin
        let behind = ray.distance_sq_to_segment(p(0.0, 0.0, 7.0), p(2.0, 0.0, 7.0));
        assert_eq!(behind.point_on_ray, p(1.0, 0.0, 5.0));
        assert_eq!(behind.distance_sq, 4.0);
    }

    #[test]
    fn test_perpendicular_ray_hits_once() {
        let line = straight_line();
        let raycaster = down_through(1.0, 0.0).with_line_threshold(0.1);

        let hits = raycast_mesh_line(&line, &raycaster, &Matrix4::identity(), 1.0, SegmentTopology::Strip);

        assert_eq!(hits.len(), 1);
        let hit = hits[0];
        assert!(hit.segment < 2);
        assert_eq!(hit.point, p(1.0, 0.0, 0.0));
        assert_eq!(hit.distance, (hit.point_on_ray - raycaster.ray.origin).magnitude());
        assert_eq!(hit.distance, 5.0);
    }

    #[test]
    fn test_ray_missing_bounding_sphere() {
        let line = straight_line();
        let raycaster = down_through(10.0, 10.0).with_line_threshold(100.0);

        let hits = raycast_mesh_line(&line, &raycaster, &Matrix4::identity(), 1.0, SegmentTopology::Strip);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_near_miss_outside_threshold() {
        let line = straight_line();
        let raycaster = down_through(1.0, 0.5).with_line_threshold(0.1);

        let thin = raycast_mesh_line(&line, &raycaster, &Matrix4::identity(), 0.0, SegmentTopology::Strip);
        assert!(thin.is_empty());

        // Widening the line brings the segment within reach
        let wide = raycast_mesh_line(&line, &raycaster, &Matrix4::identity(), 1.0, SegmentTopology::Strip);
        assert_eq!(wide.len(), 1);
    }

    #[test]
    fn test_near_far_range() {
        let line = straight_line();
        let raycaster = down_through(1.0, 0.0)
            .with_line_threshold(0.1)
            .with_near_far(0.0, 4.0);

        let hits = raycast_mesh_line(&line, &raycaster, &Matrix4::identity(), 1.0, SegmentTopology::Strip);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_world_transform_is_applied() {
        let line = straight_line();
        let matrix_world = Matrix4::from_translation(Vector3::new(0.0, 10.0, 0.0));

        let raycaster = down_through(1.0, 10.0).with_line_threshold(0.1);
        let hits = raycast_mesh_line(&line, &raycaster, &matrix_world, 1.0, SegmentTopology::Strip);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, p(1.0, 10.0, 0.0));

        let untransformed = down_through(1.0, 0.0).with_line_threshold(0.1);
        assert!(raycast_mesh_line(&line, &untransformed, &matrix_world, 1.0, SegmentTopology::Strip).is_empty());
    }

    #[test]
    fn test_singular_transform_yields_no_hits() {
        let line = straight_line();
        let raycaster = down_through(0.0, 0.0).with_line_threshold(0.1);
        let flatten = Matrix4::from_nonuniform_scale(1.0, 1.0, 0.0);

        let hits = raycast_mesh_line(&line, &raycaster, &flatten, 1.0, SegmentTopology::Strip);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_first_and_nearest_policies() {
        // Folded path: segment 0 lies below segment 1 along the ray
        let line = MeshLine::from_points(
            &[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 0.0, 2.0), p(0.0, 0.0, 2.0)],
            None,
        )
        .unwrap();
        let raycaster = down_through(0.5, 0.0).with_line_threshold(0.1);

        let first = raycast_mesh_line(&line, &raycaster, &Matrix4::identity(), 0.0, SegmentTopology::Strip);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].segment, 0);
        assert_eq!(first[0].distance, 5.0);

        let nearest = raycast_mesh_line(
            &line,
            &raycaster.with_policy(HitPolicy::Nearest),
            &Matrix4::identity(),
            0.0,
            SegmentTopology::Strip,
        );
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].segment, 2);
        assert_eq!(nearest[0].distance, 3.0);
    }

    #[test]
    fn test_missing_widths_default_to_one() {
        let ray = Ray::new(p(0.0, 0.6, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let raycaster = Raycaster::new(ray).with_line_threshold(0.2);
        let view = LineSegmentsView {
            indices: &[0, 1],
            positions: &[-1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            widths: &[],
        };

        let hits = intersect_segments(&ray, view, &raycaster, &Matrix4::identity(), 1.0, SegmentTopology::Segments);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].segment, 0);
    }

    #[test]
    fn test_screen_center_ray() {
        let raycaster = Raycaster::from_screen((50.0, 50.0), (100.0, 100.0), &Matrix4::identity()).unwrap();
        assert_eq!(raycaster.ray.origin, p(0.0, 0.0, 0.0));
        assert_eq!(raycaster.ray.direction, Vector3::new(0.0, 0.0, 1.0));

        let singular = Matrix4::from_scale(0.0);
        assert!(Raycaster::from_screen((0.0, 0.0), (100.0, 100.0), &singular).is_none());
    }
}
