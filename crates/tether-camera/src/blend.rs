//! Smoothed camera parameters and the profile transition blender

use glam::Vec3;
use tether_core::{snap_lerp, snap_lerp_vec3};

use crate::config::CameraProfile;
use crate::orbit::OrbitState;

/// Values that blend toward the active profile instead of snapping to it
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedParameters {
    /// Field of view in degrees
    pub field_of_view: f32,
    pub side_offset: f32,
    pub follow_distance: f32,
    pub anchor_offset: Vec3,
    pub look_ahead: f32,
}

impl SmoothedParameters {
    /// Parameters already resting on a profile's targets
    pub fn from_profile(profile: &CameraProfile, follow_distance: f32) -> Self {
        Self {
            field_of_view: profile.field_of_view,
            side_offset: profile.side_offset,
            follow_distance,
            anchor_offset: profile.anchor_offset,
            look_ahead: profile.look_ahead_distance,
        }
    }

    /// Whether every parameter equals the profile's target exactly
    pub fn settled_on(&self, profile: &CameraProfile, follow_distance: f32) -> bool {
        *self == Self::from_profile(profile, follow_distance)
    }
}

/// A value that can take one snapping interpolation step
trait Blend: Copy + PartialEq {
    fn step_toward(self, target: Self, t: f32) -> Self;
}

impl Blend for f32 {
    fn step_toward(self, target: Self, t: f32) -> Self {
        snap_lerp(self, target, t)
    }
}

impl Blend for Vec3 {
    fn step_toward(self, target: Self, t: f32) -> Self {
        snap_lerp_vec3(self, target, t)
    }
}

/// Advance one channel; returns `true` while it has not reached its target
fn advance<T: Blend>(current: &mut T, target: T, t: f32) -> bool {
    if *current != target {
        *current = current.step_toward(target, t);
    }
    *current != target
}

/// Drives [`SmoothedParameters`] toward the active profile after a switch
#[derive(Debug, Clone, Default)]
pub struct TransitionBlender {
    active: bool,
}

impl TransitionBlender {
    /// Start blending toward the current targets
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop blending; used when the values were applied directly
    pub fn finish(&mut self) {
        self.active = false;
    }

    pub fn is_transitioning(&self) -> bool {
        self.active
    }

    /// Run one blend step. Does nothing once every channel has converged.
    ///
    /// Returns whether the transition is still in progress.
    pub fn step(
        &mut self,
        params: &mut SmoothedParameters,
        orbit: &mut OrbitState,
        profile: &CameraProfile,
        follow_distance: f32,
        dt: f32,
    ) -> bool {
        if !self.active {
            return false;
        }

        let offset_t = profile.offset_transition_speed * dt;
        let fov_t = profile.fov_transition_speed * dt;

        let scalars = [
            (&mut params.field_of_view, profile.field_of_view, fov_t),
            (&mut params.side_offset, profile.side_offset, offset_t),
            (&mut params.follow_distance, follow_distance, offset_t),
            (&mut params.look_ahead, profile.look_ahead_distance, fov_t),
        ];

        let mut pending = false;
        for (current, target, t) in scalars {
            pending |= advance(current, target, t);
        }
        pending |= advance(&mut params.anchor_offset, profile.anchor_offset, offset_t);
        pending |= profile.mode.behavior().settle(orbit, offset_t);

        self.active = pending;
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraMode;

    fn target_profile() -> CameraProfile {
        CameraProfile {
            anchor_offset: Vec3::new(0.2, 1.6, 0.1),
            follow_distance: 0.35,
            side_offset: 0.45,
            look_ahead_distance: 6.0,
            field_of_view: 42.0,
            ..CameraProfile::named("aim", CameraMode::FreeVerticalFixedHorizontal)
        }
    }

    #[test]
    fn inactive_blender_leaves_values_alone() {
        let profile = target_profile();
        let mut params = SmoothedParameters::from_profile(&CameraProfile::default(), 0.646);
        let before = params.clone();
        let mut orbit = OrbitState::for_profile(&profile);
        let mut blender = TransitionBlender::default();

        assert!(!blender.step(&mut params, &mut orbit, &profile, 0.35, 1.0 / 60.0));
        assert_eq!(params, before);
    }

    #[test]
    fn blend_converges_exactly() {
        let profile = target_profile();
        let mut params = SmoothedParameters::from_profile(&CameraProfile::default(), 0.646);
        let mut orbit = OrbitState::for_profile(&profile);
        let mut blender = TransitionBlender::default();
        blender.start();

        let mut frames = 0;
        while blender.step(&mut params, &mut orbit, &profile, 0.35, 1.0 / 60.0) {
            frames += 1;
            assert!(frames < 1000, "blend did not settle");
        }

        assert!(frames > 1);
        assert!(!blender.is_transitioning());
        assert!(params.settled_on(&profile, 0.35));
        assert_eq!(params.field_of_view, 42.0);
        assert_eq!(params.anchor_offset, Vec3::new(0.2, 1.6, 0.1));
    }

    #[test]
    fn first_step_moves_part_way() {
        let profile = target_profile();
        let mut params = SmoothedParameters::from_profile(&CameraProfile::default(), 0.646);
        let mut orbit = OrbitState::for_profile(&profile);
        let mut blender = TransitionBlender::default();
        blender.start();

        blender.step(&mut params, &mut orbit, &profile, 0.35, 0.1);
        // 60 -> 42 at fov speed 5.1 * 0.1
        assert!((params.field_of_view - (60.0 - 18.0 * 0.51)).abs() < 1e-4);
        assert!(params.follow_distance < 0.646 && params.follow_distance > 0.35);
        assert!(blender.is_transitioning());
    }

    #[test]
    fn large_step_lands_on_targets() {
        let profile = target_profile();
        let mut params = SmoothedParameters::from_profile(&CameraProfile::default(), 0.646);
        let mut orbit = OrbitState::for_profile(&profile);
        let mut blender = TransitionBlender::default();
        blender.start();

        assert!(!blender.step(&mut params, &mut orbit, &profile, 0.35, 1.0));
        assert!(params.settled_on(&profile, 0.35));
    }

    #[test]
    fn blend_includes_orbit_settling() {
        let profile = target_profile();
        let mut params = SmoothedParameters::from_profile(&profile, 0.35);
        let mut orbit = OrbitState::for_profile(&profile);
        orbit.vector = Vec3::new(0.5, 0.0, -0.5).normalize();
        let mut blender = TransitionBlender::default();
        blender.start();

        assert!(blender.step(&mut params, &mut orbit, &profile, 0.35, 1.0 / 60.0));
        while blender.step(&mut params, &mut orbit, &profile, 0.35, 1.0 / 60.0) {}
        assert_eq!(orbit.vector.x, 0.0);
    }
}
