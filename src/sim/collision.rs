//! Collision detection
//!
//! Every entity in the field is treated as a circle. Bullet vs asteroid,
//! player vs asteroid and player vs power-up all go through the same test.

use glam::Vec2;

/// Circle-circle overlap on raw coordinates.
///
/// Compares squared center distance against the squared sum of radii.
/// Touching circles (distance == r1 + r2) do not overlap.
#[inline]
pub fn circles_overlap(x1: f32, y1: f32, r1: f32, x2: f32, y2: f32, r2: f32) -> bool {
    let dx = x1 - x2;
    let dy = y1 - y2;
    let reach = r1 + r2;
    dx * dx + dy * dy < reach * reach
}

/// `circles_overlap` for vector positions
#[inline]
pub fn overlaps(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    circles_overlap(a.x, a.y, ra, b.x, b.y, rb)
}

/// Index of the first circle in `targets` overlapping the probe.
///
/// Iteration order decides ties, not proximity.
pub fn first_overlap<I>(pos: Vec2, radius: f32, targets: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec2, f32)>,
{
    targets
        .into_iter()
        .position(|(other, other_radius)| overlaps(pos, radius, other, other_radius))
}
