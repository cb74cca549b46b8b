//! Where the rig writes its results

use glam::{Quat, Vec3};
use tether_core::Transform;

use crate::goal::NEAR_CLIP_DEFAULT;

/// Receives the camera pose computed by the rig.
///
/// `set_transform` and `set_field_of_view` are called once per frame;
/// `set_near_clip` only when the near clip plane actually changes.
pub trait CameraSink {
    fn set_transform(&mut self, position: Vec3, rotation: Quat, look_target: Vec3);
    fn set_field_of_view(&mut self, degrees: f32);
    fn set_near_clip(&mut self, near_clip: f32);
}

/// In-memory camera state, the default sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub look_target: Vec3,
    /// Field of view in degrees
    pub field_of_view: f32,
    pub near_clip: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            look_target: Vec3::Z,
            field_of_view: 60.0,
            near_clip: NEAR_CLIP_DEFAULT,
        }
    }
}

impl CameraPose {
    /// Camera transform (unit scale)
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.rotation)
    }
}

impl CameraSink for CameraPose {
    fn set_transform(&mut self, position: Vec3, rotation: Quat, look_target: Vec3) {
        self.position = position;
        self.rotation = rotation;
        self.look_target = look_target;
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view = degrees;
    }

    fn set_near_clip(&mut self, near_clip: f32) {
        self.near_clip = near_clip;
    }
}
