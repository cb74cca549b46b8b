//! Tether Camera - Third-person follow and orbit camera rig
//!
//! A [`CameraRig`] follows a target transform through a list of designer
//! profiles. Each frame it applies orbit input, enforces vertical limits,
//! blends parameters after a profile switch, and pulls the camera in front of
//! geometry reported by an [`OcclusionQuery`](tether_physics::OcclusionQuery).

mod blend;
mod config;
mod error;
mod goal;
mod mode;
mod orbit;
mod rig;
mod sink;

pub use blend::{SmoothedParameters, TransitionBlender};
pub use config::{CameraMode, CameraProfile, ProfileSet};
pub use error::{CameraError, ProfileLoadError};
pub use goal::{
    anchor_point, compute_look_goal, compute_position_goal, near_clip_for_distance,
    OcclusionMemory, PositionGoal, NEAR_CLIP_DEFAULT, NEAR_CLIP_MIN, NEAR_CLIP_REFERENCE_LENGTH,
};
pub use mode::{FixedBehavior, FreeOrbitBehavior, ModeBehavior, VerticalOrbitBehavior};
pub use orbit::{compute_bound, InputPolarity, OrbitState, BEHIND};
pub use rig::{CameraRig, FrameInput, RigState, Transition};
pub use sink::{CameraPose, CameraSink};
