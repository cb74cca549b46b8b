//! Vector helpers shared by the orbit and smoothing code

use glam::Vec3;

/// Distance below which [`snap_lerp`] and [`snap_lerp_vec3`] return the target exactly.
pub const SNAP_EPSILON: f32 = 1e-4;

/// Project `v` onto the horizontal (X-Z) plane.
///
/// With `normalize` set the result is unit length, or zero if `v` was vertical.
pub fn flatten_horizontal(v: Vec3, normalize: bool) -> Vec3 {
    let flat = Vec3::new(v.x, 0.0, v.z);
    if normalize {
        flat.normalize_or_zero()
    } else {
        flat
    }
}

/// Project `v` onto the vertical (Y-Z) plane, dropping the lateral component.
pub fn flatten_vertical(v: Vec3, normalize: bool) -> Vec3 {
    let flat = Vec3::new(0.0, v.y, v.z);
    if normalize {
        flat.normalize_or_zero()
    } else {
        flat
    }
}

/// Interpolate `a` toward `b` by `t` (clamped to `[0, 1]`), landing exactly on `b`
/// once within [`SNAP_EPSILON`].
pub fn snap_lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let value = a + (b - a) * t;
    if (value - b).abs() < SNAP_EPSILON {
        b
    } else {
        value
    }
}

/// Vector form of [`snap_lerp`]; snaps on Euclidean distance.
pub fn snap_lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    let value = a.lerp(b, t.clamp(0.0, 1.0));
    if value.distance(b) < SNAP_EPSILON {
        b
    } else {
        value
    }
}
