//! Per-mode orbit behavior
//!
//! Each [`CameraMode`] maps to one strategy object holding its input response,
//! clamp policy, transition settling and goal formula. The rig selects the
//! strategy once per frame from the active profile.

use glam::{Quat, Vec3};
use tether_core::{flatten_horizontal, snap_lerp, snap_lerp_vec3, Transform};

use crate::blend::SmoothedParameters;
use crate::config::{CameraMode, CameraProfile};
use crate::orbit::{InputPolarity, OrbitState, BEHIND};

/// Behavior of one camera mode
pub trait ModeBehavior: Sync {
    /// Mode this behavior implements
    fn mode(&self) -> CameraMode;

    /// Rotate the orbit from this frame's input axes (degrees)
    fn apply_input(&self, orbit: &mut OrbitState, horizontal: f32, vertical: f32, polarity: InputPolarity);

    /// Keep the orbit between its vertical bounds. Runs every frame, input or not.
    fn clamp_vertical(&self, orbit: &mut OrbitState);

    /// Pull the orbit toward the rest state this mode requires during a transition.
    ///
    /// Returns `true` while the orbit has not settled.
    fn settle(&self, orbit: &mut OrbitState, t: f32) -> bool;

    /// Map an orbit-space direction to world space
    fn orbit_to_world(&self, target: &Transform, direction: Vec3) -> Vec3;

    /// Unoccluded world-space position goal
    fn position_goal(
        &self,
        target: &Transform,
        profile: &CameraProfile,
        params: &SmoothedParameters,
        orbit: &OrbitState,
    ) -> Vec3;
}

impl CameraMode {
    /// Strategy object for this mode
    pub fn behavior(self) -> &'static dyn ModeBehavior {
        match self {
            CameraMode::Fixed => &FixedBehavior,
            CameraMode::FreeVerticalFixedHorizontal => &VerticalOrbitBehavior,
            CameraMode::FreeOrbit => &FreeOrbitBehavior,
        }
    }
}

/// No orbiting at all
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBehavior;

/// Vertical orbiting around the target's lateral axis
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalOrbitBehavior;

/// Vertical and horizontal orbiting in world space
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeOrbitBehavior;

/// Replace the orbit with the bound it crossed, dropping horizontal facing
fn snap_to_bounds(orbit: &mut OrbitState) {
    if orbit.vector.y > orbit.max_bound().y {
        orbit.vector = orbit.max_bound();
    } else if orbit.vector.y < orbit.min_bound().y {
        orbit.vector = orbit.min_bound();
    }
}

/// Goal for the target-attached modes: anchor, orbit, side offset and orbit height
/// all expressed in the target's local space.
fn attached_goal(
    target: &Transform,
    profile: &CameraProfile,
    params: &SmoothedParameters,
    orbit: &OrbitState,
) -> Vec3 {
    let direction = orbit.direction();
    let lift = Vec3::X.cross(direction).normalize_or_zero();
    target.transform_point(
        params.anchor_offset
            + direction * params.follow_distance
            + Vec3::X * params.side_offset
            + lift * profile.orbit_height,
    )
}

/// Yaw in radians that rotates [`BEHIND`] onto the horizontal direction `dir`
fn yaw_from_behind(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}

impl ModeBehavior for FixedBehavior {
    fn mode(&self) -> CameraMode {
        CameraMode::Fixed
    }

    fn apply_input(&self, _orbit: &mut OrbitState, _horizontal: f32, _vertical: f32, _polarity: InputPolarity) {}

    fn clamp_vertical(&self, orbit: &mut OrbitState) {
        snap_to_bounds(orbit);
    }

    fn settle(&self, orbit: &mut OrbitState, t: f32) -> bool {
        if orbit.vector == BEHIND {
            return false;
        }
        orbit.vector = snap_lerp_vec3(orbit.vector, BEHIND, t);
        orbit.remember_facing();
        orbit.vector != BEHIND
    }

    fn orbit_to_world(&self, target: &Transform, direction: Vec3) -> Vec3 {
        target.transform_vector(direction)
    }

    fn position_goal(
        &self,
        target: &Transform,
        profile: &CameraProfile,
        params: &SmoothedParameters,
        orbit: &OrbitState,
    ) -> Vec3 {
        attached_goal(target, profile, params, orbit)
    }
}

impl ModeBehavior for VerticalOrbitBehavior {
    fn mode(&self) -> CameraMode {
        CameraMode::FreeVerticalFixedHorizontal
    }

    fn apply_input(&self, orbit: &mut OrbitState, _horizontal: f32, vertical: f32, polarity: InputPolarity) {
        if vertical.abs() > 0.0 {
            orbit.rotate(Vec3::X, vertical * polarity.vertical);
        }
    }

    fn clamp_vertical(&self, orbit: &mut OrbitState) {
        snap_to_bounds(orbit);
    }

    fn settle(&self, orbit: &mut OrbitState, t: f32) -> bool {
        if orbit.vector.x == 0.0 {
            return false;
        }
        let x = snap_lerp(orbit.vector.x, 0.0, t);
        orbit.vector = Vec3::new(x, orbit.vector.y, orbit.vector.z)
            .try_normalize()
            .unwrap_or(BEHIND);
        orbit.remember_facing();
        orbit.vector.x != 0.0
    }

    fn orbit_to_world(&self, target: &Transform, direction: Vec3) -> Vec3 {
        target.transform_vector(direction)
    }

    fn position_goal(
        &self,
        target: &Transform,
        profile: &CameraProfile,
        params: &SmoothedParameters,
        orbit: &OrbitState,
    ) -> Vec3 {
        attached_goal(target, profile, params, orbit)
    }
}

impl ModeBehavior for FreeOrbitBehavior {
    fn mode(&self) -> CameraMode {
        CameraMode::FreeOrbit
    }

    fn apply_input(&self, orbit: &mut OrbitState, horizontal: f32, vertical: f32, polarity: InputPolarity) {
        if horizontal.abs() > 0.0 {
            orbit.rotate(Vec3::Y, horizontal * polarity.horizontal);
        }
        if vertical.abs() > 0.0 {
            // Axis follows the current facing so vertical input always tilts toward the target
            let axis = orbit.horizontal_facing().cross(Vec3::Y);
            orbit.rotate(axis, vertical * polarity.vertical);
        }
    }

    fn clamp_vertical(&self, orbit: &mut OrbitState) {
        let bound = if orbit.vector.y > orbit.max_bound().y {
            orbit.max_bound()
        } else if orbit.vector.y < orbit.min_bound().y {
            orbit.min_bound()
        } else {
            orbit.remember_facing();
            return;
        };

        let bound_facing = flatten_horizontal(bound, false)
            .try_normalize()
            .unwrap_or(BEHIND);
        let yaw = yaw_from_behind(orbit.horizontal_facing()) - yaw_from_behind(bound_facing);
        orbit.vector = Quat::from_rotation_y(yaw) * bound;
        orbit.remember_facing();
    }

    fn settle(&self, _orbit: &mut OrbitState, _t: f32) -> bool {
        false
    }

    fn orbit_to_world(&self, _target: &Transform, direction: Vec3) -> Vec3 {
        direction
    }

    fn position_goal(
        &self,
        target: &Transform,
        _profile: &CameraProfile,
        params: &SmoothedParameters,
        orbit: &OrbitState,
    ) -> Vec3 {
        target.transform_point(params.anchor_offset) + orbit.direction() * params.follow_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn orbit() -> OrbitState {
        OrbitState::new(0.81, -0.865)
    }

    #[test]
    fn behavior_matches_mode() {
        for mode in [
            CameraMode::Fixed,
            CameraMode::FreeVerticalFixedHorizontal,
            CameraMode::FreeOrbit,
        ] {
            assert_eq!(mode.behavior().mode(), mode);
        }
    }

    #[test]
    fn fixed_ignores_input() {
        let mut orbit = orbit();
        FixedBehavior.apply_input(&mut orbit, 30.0, -45.0, InputPolarity::default());
        FixedBehavior.clamp_vertical(&mut orbit);
        assert_eq!(orbit.vector, BEHIND);
    }

    #[test]
    fn vertical_input_raises_camera() {
        let mut orbit = orbit();
        VerticalOrbitBehavior.apply_input(&mut orbit, 0.0, 20.0, InputPolarity::default());
        assert!(orbit.vector.y > 0.0);

        let mut inverted = self::orbit();
        let polarity = InputPolarity {
            horizontal: 1.0,
            vertical: -1.0,
        };
        VerticalOrbitBehavior.apply_input(&mut inverted, 0.0, 20.0, polarity);
        assert!(inverted.vector.y < 0.0);
    }

    #[test]
    fn vertical_mode_never_gains_lateral_component() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut orbit = orbit();
        for _ in 0..2000 {
            let h: f32 = rng.gen_range(-30.0..30.0);
            let v: f32 = rng.gen_range(-30.0..30.0);
            VerticalOrbitBehavior.apply_input(&mut orbit, h, v, InputPolarity::default());
            VerticalOrbitBehavior.clamp_vertical(&mut orbit);
            assert!(orbit.vector.x.abs() < 1e-6, "x drifted to {}", orbit.vector.x);
            assert!(orbit.vector.y <= orbit.max_bound().y + 1e-6);
            assert!(orbit.vector.y >= orbit.min_bound().y - 1e-6);
        }
    }

    #[test]
    fn vertical_clamp_snaps_to_bound_vector() {
        let mut orbit = orbit();
        orbit.vector = Vec3::new(0.0, 0.95, -0.3);
        VerticalOrbitBehavior.clamp_vertical(&mut orbit);
        assert_eq!(orbit.vector, orbit.max_bound());

        orbit.vector = Vec3::new(0.0, -0.99, -0.1);
        VerticalOrbitBehavior.clamp_vertical(&mut orbit);
        assert_eq!(orbit.vector, orbit.min_bound());
    }

    #[test]
    fn vertical_settle_returns_behind_orbit_plane() {
        let mut orbit = orbit();
        orbit.vector = Vec3::new(0.6, 0.2, -0.77).normalize();
        let mut frames = 0;
        while VerticalOrbitBehavior.settle(&mut orbit, 0.11) {
            frames += 1;
            assert!(frames < 500);
        }
        assert_eq!(orbit.vector.x, 0.0);
        assert!((orbit.vector.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn free_orbit_horizontal_input_rotates_around_up() {
        let mut orbit = orbit();
        FreeOrbitBehavior.apply_input(&mut orbit, 90.0, 0.0, InputPolarity::default());
        assert!(orbit.vector.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));

        FreeOrbitBehavior.apply_input(&mut orbit, 0.0, 30.0, InputPolarity::default());
        assert!((orbit.vector.y - 0.5).abs() < 1e-5);
        assert!(orbit.vector.z.abs() < 1e-5);
    }

    #[test]
    fn free_orbit_clamp_preserves_facing() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let mut orbit = orbit();
            let yaw: f32 = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
            let y: f32 = if rng.gen_bool(0.5) {
                rng.gen_range(0.82..0.99)
            } else {
                rng.gen_range(-0.99..-0.87)
            };
            let horizontal = (1.0 - y * y).sqrt();
            orbit.vector = Vec3::new(-yaw.sin() * horizontal, y, -yaw.cos() * horizontal);
            let facing_before = flatten_horizontal(orbit.vector, true);

            FreeOrbitBehavior.clamp_vertical(&mut orbit);

            let expected_y = if y > 0.0 {
                orbit.max_bound().y
            } else {
                orbit.min_bound().y
            };
            assert!((orbit.vector.y - expected_y).abs() < 1e-5);
            assert!(flatten_horizontal(orbit.vector, true).abs_diff_eq(facing_before, 1e-4));
        }
    }

    #[test]
    fn free_orbit_clamp_straight_up_uses_last_facing() {
        let mut orbit = orbit();
        FreeOrbitBehavior.apply_input(&mut orbit, 90.0, 0.0, InputPolarity::default());
        orbit.vector = Vec3::Y;

        FreeOrbitBehavior.clamp_vertical(&mut orbit);
        assert!((orbit.vector.y - 0.81).abs() < 1e-5);
        assert!(flatten_horizontal(orbit.vector, true).abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn fixed_settle_returns_behind() {
        let mut orbit = orbit();
        orbit.vector = Vec3::new(0.3, 0.4, -0.8);
        let mut frames = 0;
        while FixedBehavior.settle(&mut orbit, 0.2) {
            frames += 1;
            assert!(frames < 500);
        }
        assert_eq!(orbit.vector, BEHIND);
    }
}
