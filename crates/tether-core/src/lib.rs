//! Tether Core - Core types and utilities for the Tether camera rig
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform used for follow targets and the camera itself
//! - Planar projection and snapping interpolation helpers
//! - Frame clock that turns raw frame deltas into clamped delta times

pub mod time;
pub mod types;
pub mod vector;

pub use glam::{Quat, Vec3};
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
pub use vector::{flatten_horizontal, flatten_vertical, snap_lerp, snap_lerp_vec3, SNAP_EPSILON};
