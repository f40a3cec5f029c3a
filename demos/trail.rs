//! # Trail Demo
//!
//! Headless walkthrough of the line API: builds a tapered helix, streams new
//! points into it like a particle trail, then picks it with a ray cast from a screen position.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example trail
//! ```

use anyhow::Context;
use cgmath::{perspective, Deg};
use meshline::prelude::*;

/// Number of points kept in the trail
const TRAIL_LENGTH: usize = 64;

/// Virtual window size in pixels
const SCREEN_SIZE: (f32, f32) = (1280.0, 720.0);

/// Remaps OpenGL clip depth (-1..1) to wgpu's 0..1
#[rustfmt::skip]
const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

fn helix(t: f32) -> Point3<f32> {
    Point3::new(t.cos() * 2.0, t.sin() * 2.0, t * 0.1)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path: Vec<Point3<f32>> = (0..TRAIL_LENGTH).map(|i| helix(i as f32 * 0.1)).collect();

    // Thin at the tail, full width at the head
    let mut trail = MeshLine::from_points(&path, Some(Box::new(|t: f32| t.max(0.05))))
        .context("building initial trail")?;
    log::info!(
        "Built trail: {} points, {} indices",
        trail.len(),
        trail.indices().len()
    );

    for step in 0..120 {
        let t = (TRAIL_LENGTH + step) as f32 * 0.1;
        trail.advance(helix(t)).context("advancing trail")?;
    }
    let head = trail.points()[trail.len() - 1];
    log::info!("Trail head after streaming: {:?}", head);

    // Bounds are stale after streaming, refresh them before picking
    trail.rebuild().context("refreshing trail bounds")?;

    let matrix_world = Matrix4::from_scale(1.5);
    let world_head = Point3::new(head.x * 1.5, head.y * 1.5, head.z * 1.5);

    // Camera hovering above the head, looking straight down at it
    let eye = world_head + Vector3::new(0.0, 0.0, 10.0);
    let view = Matrix4::look_at_rh(eye, world_head, Vector3::unit_y());
    let proj = OPENGL_TO_WGPU_MATRIX * perspective(Deg(45.0), SCREEN_SIZE.0 / SCREEN_SIZE.1, 0.1, 100.0);
    let view_proj = proj * view;

    // Mouse position over the head, as a windowing layer would report it
    let clip = view_proj * world_head.to_homogeneous();
    let mouse = (
        (clip.x / clip.w + 1.0) * 0.5 * SCREEN_SIZE.0,
        (1.0 - clip.y / clip.w) * 0.5 * SCREEN_SIZE.1,
    );
    log::info!("Picking at screen position {:?}", mouse);

    let raycaster = Raycaster::from_screen(mouse, SCREEN_SIZE, &view_proj)
        .context("view-projection matrix is not invertible")?
        .with_line_threshold(0.05)
        .with_policy(HitPolicy::Nearest);

    let hits = raycast_mesh_line(&trail, &raycaster, &matrix_world, 0.2, SegmentTopology::Strip);
    match hits.first() {
        Some(hit) => log::info!(
            "Picked segment {} at distance {:.3}, point {:?}",
            hit.segment,
            hit.distance,
            hit.point
        ),
        None => log::warn!("Ray missed the trail"),
    }

    Ok(())
}
