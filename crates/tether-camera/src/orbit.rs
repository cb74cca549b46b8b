//! Orbit vector state and vertical bounds

use glam::{Quat, Vec3};
use tether_core::flatten_horizontal;

use crate::config::CameraProfile;

/// Orbit direction that places the camera directly behind the target
pub const BEHIND: Vec3 = Vec3::NEG_Z;

/// Orbit vectors shorter than this contribute nothing to goal computation
const DEGENERATE_LENGTH: f32 = 1e-6;

/// Point on the unit circle in the Y-Z plane at height `tilt`, on the behind side.
///
/// `tilt` must lie in `[-1, 1]`; profile validation guarantees this for the rig.
pub fn compute_bound(tilt: f32) -> Vec3 {
    Vec3::new(0.0, tilt, -(1.0 - tilt * tilt).sqrt())
}

/// Sign applied to each input axis (1 or -1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputPolarity {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for InputPolarity {
    fn default() -> Self {
        Self {
            horizontal: 1.0,
            vertical: 1.0,
        }
    }
}

impl InputPolarity {
    /// Polarity from a profile's negation flags
    pub fn from_profile(profile: &CameraProfile) -> Self {
        let sign = |negate: bool| if negate { -1.0 } else { 1.0 };
        Self {
            horizontal: sign(profile.negate_horizontal),
            vertical: sign(profile.negate_vertical),
        }
    }
}

/// Current orbit direction plus the bound vectors derived from the active profile
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    /// Direction from the anchor to the camera
    pub vector: Vec3,
    max_bound: Vec3,
    min_bound: Vec3,
    /// Last non-degenerate horizontal direction of `vector`
    facing: Vec3,
}

impl OrbitState {
    /// Orbit directly behind the target with bounds at the given tilts
    pub fn new(max_tilt: f32, min_tilt: f32) -> Self {
        Self {
            vector: BEHIND,
            max_bound: compute_bound(max_tilt),
            min_bound: compute_bound(min_tilt),
            facing: BEHIND,
        }
    }

    /// Orbit state for a profile's tilt limits
    pub fn for_profile(profile: &CameraProfile) -> Self {
        Self::new(profile.max_tilt, profile.min_tilt)
    }

    /// Recompute both bound vectors; the orbit vector itself is left alone
    pub fn set_bounds(&mut self, max_tilt: f32, min_tilt: f32) {
        self.max_bound = compute_bound(max_tilt);
        self.min_bound = compute_bound(min_tilt);
    }

    pub fn max_bound(&self) -> Vec3 {
        self.max_bound
    }

    pub fn min_bound(&self) -> Vec3 {
        self.min_bound
    }

    /// Put the orbit back directly behind the target
    pub fn reset(&mut self) {
        self.vector = BEHIND;
        self.facing = BEHIND;
    }

    /// Rotate the orbit vector by `degrees` around `axis`. A zero axis is ignored.
    pub fn rotate(&mut self, axis: Vec3, degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        self.vector = Quat::from_axis_angle(axis, degrees.to_radians()) * self.vector;
        self.remember_facing();
    }

    /// Horizontal facing of the orbit, falling back to the last known facing
    /// when the orbit points straight up or down.
    pub fn horizontal_facing(&self) -> Vec3 {
        flatten_horizontal(self.vector, false)
            .try_normalize()
            .unwrap_or(self.facing)
    }

    /// Record the current horizontal facing if it is well defined
    pub fn remember_facing(&mut self) {
        if let Some(facing) = flatten_horizontal(self.vector, false).try_normalize() {
            self.facing = facing;
        }
    }

    /// Push the orbit vertically. Bounds are re-enforced on the next frame.
    pub fn apply_recoil(&mut self, recoil: Vec3) {
        self.vector.y -= recoil.y;
    }

    /// Unit orbit direction, or zero for a degenerate vector
    pub fn direction(&self) -> Vec3 {
        if self.vector.length() < DEGENERATE_LENGTH {
            Vec3::ZERO
        } else {
            self.vector.normalize_or_zero()
        }
    }

    /// Aim pitch in `[-1, 1]` for animation consumers: the negated vertical
    /// component of the orbit.
    ///
    /// Looking up (camera low) is positive, looking down (camera high) is negative.
    pub fn aim_pitch(&self) -> f32 {
        (-self.vector.y).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn bound_lies_on_unit_circle() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let tilt: f32 = rng.gen_range(-1.0..=1.0);
            let bound = compute_bound(tilt);
            assert_eq!(bound.x, 0.0);
            assert_eq!(bound.y, tilt);
            assert!(bound.z <= 0.0);
            assert!((bound.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn bounds_follow_profile() {
        let profile = CameraProfile::default();
        let mut orbit = OrbitState::for_profile(&profile);
        assert_eq!(orbit.vector, BEHIND);
        assert_eq!(orbit.max_bound().y, 0.81);
        assert_eq!(orbit.min_bound().y, -0.865);

        orbit.set_bounds(0.5, -0.25);
        assert_eq!(orbit.max_bound(), compute_bound(0.5));
        assert_eq!(orbit.min_bound(), compute_bound(-0.25));
    }

    #[test]
    fn polarity_from_negation_flags() {
        let profile = CameraProfile {
            negate_vertical: true,
            ..Default::default()
        };
        let polarity = InputPolarity::from_profile(&profile);
        assert_eq!(polarity.horizontal, 1.0);
        assert_eq!(polarity.vertical, -1.0);
    }

    #[test]
    fn recoil_lowers_vertical_component_exactly() {
        let mut orbit = OrbitState::new(0.81, -0.865);
        orbit.rotate(Vec3::X, 10.0);
        let before = orbit.vector;

        orbit.apply_recoil(Vec3::new(0.3, 0.2, -0.1));
        assert_eq!(orbit.vector.y, before.y - 0.2);
        assert_eq!(orbit.vector.x, before.x);
        assert_eq!(orbit.vector.z, before.z);
    }

    #[test]
    fn degenerate_orbit_has_no_direction() {
        let mut orbit = OrbitState::new(0.81, -0.865);
        orbit.vector = Vec3::ZERO;
        assert_eq!(orbit.direction(), Vec3::ZERO);

        orbit.vector = Vec3::new(0.0, 0.0, -2.0);
        assert_eq!(orbit.direction(), BEHIND);
    }

    #[test]
    fn facing_survives_vertical_orbit() {
        let mut orbit = OrbitState::new(1.0, -1.0);
        orbit.rotate(Vec3::Y, 90.0);
        let facing = orbit.horizontal_facing();
        assert!(facing.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));

        orbit.vector = Vec3::Y;
        assert!(orbit.horizontal_facing().abs_diff_eq(facing, 1e-6));

        orbit.rotate(Vec3::ZERO, 45.0);
        assert_eq!(orbit.vector, Vec3::Y);
    }

    #[test]
    fn aim_pitch_is_negated_height() {
        let mut orbit = OrbitState::new(0.81, -0.865);
        assert_eq!(orbit.aim_pitch(), 0.0);

        orbit.vector = orbit.max_bound();
        assert!((orbit.aim_pitch() + 0.81).abs() < 1e-6);

        orbit.vector = orbit.min_bound();
        assert!((orbit.aim_pitch() - 0.865).abs() < 1e-6);

        orbit.vector = Vec3::new(0.0, 0.4, -0.9);
        assert_eq!(orbit.aim_pitch(), -0.4);

        orbit.vector = Vec3::new(0.0, -1.5, 0.0);
        assert_eq!(orbit.aim_pitch(), 1.0);
    }
}
