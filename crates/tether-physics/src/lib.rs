//! Tether Physics - Line-of-sight queries using rapier3d
//!
//! Provides a static collision world and the [`OcclusionQuery`] service the
//! camera rig uses to pull its goal in front of intersecting geometry.

mod occlusion;

pub use occlusion::{OcclusionHit, OcclusionQuery, ALL_LAYERS};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use tracing::debug;

/// Static collision world answering ray and line queries
pub struct PhysicsWorld {
    /// Rigid body storage (colliders without a parent body still need it for queries)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.query_pipeline.update(&self.collider_set);
        handle
    }

    /// Number of colliders in the world
    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Cast a ray and return the first hit within `max_distance`
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<OcclusionHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
            .map(|(_, time_of_impact)| OcclusionHit {
                point: origin + direction * time_of_impact,
                distance: time_of_impact,
            })
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider on every layer
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        self.create_static_box_on_layers(half_extents, position, ALL_LAYERS)
    }

    /// Create a static box collider that belongs to the given layer bits
    pub fn create_static_box_on_layers(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        layers: u32,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(layers),
                Group::ALL,
            ))
            .build();
        debug!("Added occluder box at {:?} on layers {:#x}", position, layers);
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl OcclusionQuery for PhysicsWorld {
    fn linecast(&self, from: Vec3, to: Vec3, mask: u32) -> Option<OcclusionHit> {
        let offset = to - from;
        let length = offset.length();
        let direction = offset.try_normalize()?;

        let filter = QueryFilter::default().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(mask),
        ));

        self.raycast(from, direction, length, filter)
    }
}
