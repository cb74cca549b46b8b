//! Occlusion query service consumed by the camera rig

use glam::Vec3;

/// Collision mask that matches every layer
pub const ALL_LAYERS: u32 = u32::MAX;

/// First intersection along a line query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcclusionHit {
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the query start to the hit point
    pub distance: f32,
}

/// Synchronous line-of-sight query between two world points.
pub trait OcclusionQuery {
    /// Return the first hit on the segment `from -> to` against colliders on `mask`,
    /// or `None` if the segment is clear.
    fn linecast(&self, from: Vec3, to: Vec3, mask: u32) -> Option<OcclusionHit>;
}
