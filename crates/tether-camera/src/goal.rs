//! Position and look goals, with occlusion correction

use glam::Vec3;
use tether_core::{snap_lerp, Transform};
use tether_physics::OcclusionQuery;

use crate::blend::SmoothedParameters;
use crate::config::CameraProfile;
use crate::orbit::OrbitState;

/// Near clip plane while the camera is pressed fully against an occluder
pub const NEAR_CLIP_MIN: f32 = 0.15;
/// Near clip plane when nothing is in the way
pub const NEAR_CLIP_DEFAULT: f32 = 0.3;
/// Anchor-to-camera distance at which the occluded near clip reaches the default
pub const NEAR_CLIP_REFERENCE_LENGTH: f32 = 0.86728;

/// Whether the previous frame's line of sight was blocked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OcclusionMemory {
    occluded_last_frame: bool,
}

impl OcclusionMemory {
    pub fn was_occluded(&self) -> bool {
        self.occluded_last_frame
    }

    /// Forget the previous frame, e.g. after a placement
    pub fn clear(&mut self) {
        self.occluded_last_frame = false;
    }
}

/// Position goal after occlusion handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionGoal {
    /// World-space camera goal
    pub position: Vec3,
    /// World-space anchor point the goal was resolved from
    pub anchor: Vec3,
    /// New near clip value, only when it needs to be written this frame
    pub near_clip: Option<f32>,
}

/// Near clip plane for a camera pulled in to `distance` from the anchor
pub fn near_clip_for_distance(distance: f32) -> f32 {
    snap_lerp(NEAR_CLIP_MIN, NEAR_CLIP_DEFAULT, distance / NEAR_CLIP_REFERENCE_LENGTH)
}

/// World-space anchor point the camera orbits around
pub fn anchor_point(target: &Transform, params: &SmoothedParameters) -> Vec3 {
    target.transform_point(params.anchor_offset)
}

/// Compute the camera position goal, pulling it in front of any occluder.
///
/// The near clip is lowered on every occluded frame and restored exactly once
/// when the line of sight clears.
pub fn compute_position_goal(
    target: &Transform,
    profile: &CameraProfile,
    params: &SmoothedParameters,
    orbit: &OrbitState,
    world: Option<&dyn OcclusionQuery>,
    memory: &mut OcclusionMemory,
) -> PositionGoal {
    let anchor = anchor_point(target, params);
    let position = profile
        .mode
        .behavior()
        .position_goal(target, profile, params, orbit);

    let hit = match world {
        Some(world) if profile.handle_occlusion => {
            world.linecast(anchor, position, profile.occlusion_mask)
        }
        _ => None,
    };

    match hit {
        Some(hit) => {
            let distance = anchor.distance(hit.point);
            let position = anchor + (position - anchor).normalize_or_zero() * distance;
            memory.occluded_last_frame = true;
            PositionGoal {
                position,
                anchor,
                near_clip: Some(near_clip_for_distance(distance)),
            }
        }
        None => {
            let near_clip = memory.occluded_last_frame.then_some(NEAR_CLIP_DEFAULT);
            memory.occluded_last_frame = false;
            PositionGoal {
                position,
                anchor,
                near_clip,
            }
        }
    }
}

/// Point the camera looks at: through the anchor, ahead of the target
pub fn compute_look_goal(
    target: &Transform,
    profile: &CameraProfile,
    params: &SmoothedParameters,
    orbit: &OrbitState,
) -> Vec3 {
    let ahead = profile
        .mode
        .behavior()
        .orbit_to_world(target, -orbit.direction() * params.look_ahead);
    anchor_point(target, params) + ahead
}
