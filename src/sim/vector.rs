//! 2D point/velocity math
//!
//! `Vector2` is glam's `Vec2`: `+=` adds in place, `length()` and `* s`
//! cover magnitude and scaling. The helpers below pin the exact semantics
//! the simulation depends on (zero-safe normalize, facing convention,
//! toroidal wrap).

use glam::Vec2;

/// Position / velocity value type used by every entity
pub type Vector2 = Vec2;

/// Unit vector for a facing angle. Angle 0 points along -Y (up the screen),
/// positive angles turn clockwise on screen.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Normalize in place. A vector of exactly zero length is left untouched.
#[inline]
pub fn normalize_in_place(v: &mut Vec2) {
    let len = v.length();
    if len == 0.0 {
        return;
    }
    *v /= len;
}

/// Return `v` scaled by `s`
#[inline]
pub fn scaled(v: Vec2, s: f32) -> Vec2 {
    v * s
}

/// Clamp the magnitude of `v` to `max`, keeping its direction
#[inline]
pub fn clamp_speed(v: &mut Vec2, max: f32) {
    if v.length() > max {
        normalize_in_place(v);
        *v = scaled(*v, max);
    }
}

/// Wrap a single coordinate into `[0, extent)`
#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Toroidal wrap: leaving one edge re-enters from the opposite edge
#[inline]
pub fn wrap_toroidal(pos: Vec2, field: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, field.x), wrap_axis(pos.y, field.y))
}

/// Toroidal wrap that lets an entity fully leave the field (by `margin`)
/// before it re-enters on the far side
pub fn wrap_with_margin(pos: Vec2, field: Vec2, margin: f32) -> Vec2 {
    let wrap = |v: f32, extent: f32| {
        let span = extent + 2.0 * margin;
        if v < -margin {
            v + span
        } else if v > extent + margin {
            v - span
        } else {
            v
        }
    };
    Vec2::new(wrap(pos.x, field.x), wrap(pos.y, field.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const FIELD: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn test_heading_zero_points_up() {
        let h = heading(0.0);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y + 1.0).abs() < 1e-6);

        let right = heading(FRAC_PI_2);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vec2::ZERO;
        normalize_in_place(&mut v);
        assert_eq!(v, Vec2::ZERO);

        let mut v = Vec2::new(3.0, 4.0);
        normalize_in_place(&mut v);
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_speed_scales_to_exact_max() {
        let mut v = Vec2::new(30.0, 40.0);
        clamp_speed(&mut v, 6.5);
        assert!((v.length() - 6.5).abs() < 1e-5);

        let mut slow = Vec2::new(1.0, 1.0);
        clamp_speed(&mut slow, 6.5);
        assert_eq!(slow, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_wrap_toroidal() {
        let p = wrap_toroidal(Vec2::new(-1.0, 10.0), FIELD);
        assert_eq!(p, Vec2::new(1279.0, 10.0));

        let p = wrap_toroidal(Vec2::new(1281.0, 721.0), FIELD);
        assert_eq!(p, Vec2::new(1.0, 1.0));

        let p = wrap_toroidal(Vec2::new(-1e-9, 0.0), FIELD);
        assert!(p.x < FIELD.x);
    }

    #[test]
    fn test_wrap_with_margin() {
        let margin = 20.0;
        // Still inside the margin band: untouched
        let p = wrap_with_margin(Vec2::new(-15.0, 300.0), FIELD, margin);
        assert_eq!(p, Vec2::new(-15.0, 300.0));

        let p = wrap_with_margin(Vec2::new(-21.0, 300.0), FIELD, margin);
        assert_eq!(p.x, 1299.0);

        let p = wrap_with_margin(Vec2::new(100.0, 741.0), FIELD, margin);
        assert_eq!(p.y, -19.0);
    }
}
