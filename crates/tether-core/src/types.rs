//! Core types used throughout the Tether workspace

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform representing position, rotation, and scale
///
/// Local space is left-handed: +X right, +Y up, +Z forward. "Behind" a
/// transform is therefore its local -Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Get the forward direction (positive Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Map a point from local space to world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * point)
    }

    /// Map a direction from local space to world space (scale applied, no translation)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * (self.scale * vector)
    }

    /// Rotation that points local +Z from `from` toward `target`.
    ///
    /// Returns `None` when the two points coincide or the direction is parallel to `up`.
    pub fn look_rotation(from: Vec3, target: Vec3, up: Vec3) -> Option<Quat> {
        let forward = (target - from).try_normalize()?;
        let right = up.cross(forward).try_normalize()?;
        let up = forward.cross(right);
        Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
    }

    /// Look at a target position; leaves the rotation untouched if no orientation is defined
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        if let Some(rotation) = Self::look_rotation(self.position, target, up) {
            self.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_point_translates() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.transform_vector(Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_transform_point_matches_matrix() {
        let transform = Transform {
            position: Vec3::new(4.0, 0.5, -2.0),
            rotation: Quat::from_rotation_y(0.7),
            scale: Vec3::splat(2.0),
        };
        let local = Vec3::new(0.0, 1.4, -0.646);
        let expected = glam::Mat4::from_scale_rotation_translation(
            transform.scale,
            transform.rotation,
            transform.position,
        )
        .transform_point3(local);
        assert!(transform.transform_point(local).abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut transform = Transform::from_position(Vec3::new(0.0, 1.0, -5.0));
        let target = Vec3::new(3.0, 1.0, 2.0);
        transform.look_at(target, Vec3::Y);

        let expected = (target - transform.position).normalize();
        assert!(transform.forward().abs_diff_eq(expected, 1e-5));
        assert!((transform.rotation * Vec3::X).y.abs() < 1e-5);
    }

    #[test]
    fn test_look_at_degenerate_keeps_rotation() {
        let rotation = Quat::from_rotation_y(1.0);
        let mut transform = Transform::from_position_rotation(Vec3::ZERO, rotation);
        transform.look_at(Vec3::ZERO, Vec3::Y);
        assert_eq!(transform.rotation, rotation);

        transform.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert_eq!(transform.rotation, rotation);
    }
}
