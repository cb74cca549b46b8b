//! Camera rig: per-frame driver and public operations

use glam::Vec3;
use tether_core::{snap_lerp_vec3, Transform};
use tether_physics::OcclusionQuery;
use tracing::{debug, error, warn};

use crate::blend::{SmoothedParameters, TransitionBlender};
use crate::config::CameraProfile;
use crate::error::CameraError;
use crate::goal::{compute_look_goal, compute_position_goal, OcclusionMemory, NEAR_CLIP_DEFAULT};
use crate::orbit::{InputPolarity, OrbitState};
use crate::sink::{CameraPose, CameraSink};

/// Input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Horizontal orbit input in degrees
    pub horizontal: f32,
    /// Vertical orbit input in degrees
    pub vertical: f32,
    /// Seconds since the previous frame
    pub delta_time: f32,
}

impl FrameInput {
    pub fn new(horizontal: f32, vertical: f32, delta_time: f32) -> Self {
        Self {
            horizontal,
            vertical,
            delta_time,
        }
    }

    /// A frame without orbit input
    pub fn idle(delta_time: f32) -> Self {
        Self::new(0.0, 0.0, delta_time)
    }

    fn delta(&self) -> f32 {
        if self.delta_time.is_finite() {
            self.delta_time.max(0.0)
        } else {
            0.0
        }
    }
}

/// How a configuration switch reaches the new profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transition {
    /// Blend smoothed values over the following frames
    #[default]
    Blend,
    /// Apply the new values and re-place the camera immediately
    Snap,
}

/// Mutable state owned by one rig
#[derive(Debug, Clone)]
pub struct RigState {
    pub orbit: OrbitState,
    pub smoothed: SmoothedParameters,
    pub blender: TransitionBlender,
    pub occlusion: OcclusionMemory,
    /// The camera's own transform after smoothing
    pub camera: Transform,
}

/// Third-person camera that follows and orbits a target.
///
/// All operations take `&mut self`; a rig has exactly one writer, and a
/// configuration switch can only happen between two frame updates.
pub struct CameraRig<S: CameraSink = CameraPose> {
    profiles: Vec<CameraProfile>,
    current: usize,
    polarity: InputPolarity,
    /// Follow distance the blender converges to; settable between switches
    cached_follow_distance: f32,
    follow_target: Option<Transform>,
    state: RigState,
    sink: S,
}

impl CameraRig {
    /// Create a rig writing into an in-memory [`CameraPose`]
    pub fn new(profiles: Vec<CameraProfile>) -> Self {
        Self::with_sink(profiles, CameraPose::default())
    }
}

impl<S: CameraSink> CameraRig<S> {
    /// Create a rig writing into a custom sink
    pub fn with_sink(profiles: Vec<CameraProfile>, sink: S) -> Self {
        let seed = profiles.first().cloned().unwrap_or_default();
        Self {
            polarity: InputPolarity::from_profile(&seed),
            cached_follow_distance: seed.follow_distance,
            state: RigState {
                orbit: OrbitState::for_profile(&seed),
                smoothed: SmoothedParameters::from_profile(&seed, seed.follow_distance),
                blender: TransitionBlender::default(),
                occlusion: OcclusionMemory::default(),
                camera: Transform::default(),
            },
            profiles,
            current: 0,
            follow_target: None,
            sink,
        }
    }

    fn check_index(&self, index: usize) -> Result<usize, CameraError> {
        if self.profiles.is_empty() {
            return Err(CameraError::NoProfiles);
        }
        if index >= self.profiles.len() {
            return Err(CameraError::ProfileOutOfRange {
                index,
                len: self.profiles.len(),
            });
        }
        Ok(index)
    }

    fn active_index(&self) -> Result<usize, CameraError> {
        self.check_index(self.current).inspect_err(|e| {
            error!("Camera rig has no usable profile: {}", e);
        })
    }

    fn bound_target(&self) -> Result<Transform, CameraError> {
        self.follow_target.ok_or_else(|| {
            error!("Camera rig has no follow target bound");
            CameraError::MissingTarget
        })
    }

    /// Check every profile and the selected index before placing or updating
    pub fn validate(&self) -> Result<(), CameraError> {
        self.active_index()?;
        self.profiles.iter().try_for_each(CameraProfile::validate).inspect_err(|e| {
            error!("Camera rig configuration is invalid: {}", e);
        })
    }

    /// Profile currently driving the rig
    pub fn active_profile(&self) -> Result<&CameraProfile, CameraError> {
        let index = self.active_index()?;
        Ok(&self.profiles[index])
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn profiles(&self) -> &[CameraProfile] {
        &self.profiles
    }

    /// Replace the profile list. The current index is kept.
    pub fn set_profiles(&mut self, profiles: Vec<CameraProfile>) -> Result<(), CameraError> {
        profiles.iter().try_for_each(CameraProfile::validate)?;
        self.profiles = profiles;

        match self.check_index(self.current) {
            Ok(index) => {
                self.apply_profile_settings(index);
                self.state.blender.start();
            }
            Err(e) => warn!("Camera profiles replaced, but {}", e),
        }
        Ok(())
    }

    fn apply_profile_settings(&mut self, index: usize) {
        let profile = &self.profiles[index];
        self.polarity = InputPolarity::from_profile(profile);
        self.state.orbit.set_bounds(profile.max_tilt, profile.min_tilt);
        self.cached_follow_distance = profile.follow_distance;
    }

    /// Bind the follow target and place the camera at its default pose
    pub fn initialize(
        &mut self,
        target: Transform,
        world: Option<&dyn OcclusionQuery>,
    ) -> Result<(), CameraError> {
        self.validate()?;
        self.follow_target = Some(target);
        self.apply_profile_settings(self.current);
        self.default_placement(world)
    }

    /// Refresh the follow target's pose. Call after the target has moved this frame.
    pub fn track(&mut self, target: Transform) {
        self.follow_target = Some(target);
    }

    /// Drop the follow target; updates fail until a new one is bound
    pub fn unbind(&mut self) {
        self.follow_target = None;
    }

    pub fn follow_target(&self) -> Option<&Transform> {
        self.follow_target.as_ref()
    }

    /// Reset every smoothed value and the orbit, then place the camera on its goals at once
    pub fn default_placement(
        &mut self,
        world: Option<&dyn OcclusionQuery>,
    ) -> Result<(), CameraError> {
        let index = self.active_index()?;
        let target = self.bound_target()?;
        self.reset_and_place(index, &target, world);
        debug!("Placed camera for profile '{}'", self.profiles[index].name);
        Ok(())
    }

    /// Shared by placement and snap switches. Forgets any occlusion from the
    /// previous pose and writes the near clip unconditionally.
    fn reset_and_place(
        &mut self,
        index: usize,
        target: &Transform,
        world: Option<&dyn OcclusionQuery>,
    ) {
        let profile = &self.profiles[index];
        let state = &mut self.state;

        state.smoothed = SmoothedParameters::from_profile(profile, self.cached_follow_distance);
        state.orbit.reset();
        state.blender.finish();
        state.occlusion.clear();
        Self::place(profile, target, state, &mut self.sink, world, None);
    }

    /// Advance the rig by one frame
    pub fn update(
        &mut self,
        input: FrameInput,
        world: Option<&dyn OcclusionQuery>,
    ) -> Result<(), CameraError> {
        let index = self.active_index()?;
        let target = self.bound_target()?;
        let dt = input.delta();
        let profile = &self.profiles[index];
        let behavior = profile.mode.behavior();
        let state = &mut self.state;

        state.blender.step(
            &mut state.smoothed,
            &mut state.orbit,
            profile,
            self.cached_follow_distance,
            dt,
        );
        behavior.apply_input(&mut state.orbit, input.horizontal, input.vertical, self.polarity);
        // Unconditional: recoil moves the orbit without any input
        behavior.clamp_vertical(&mut state.orbit);

        Self::place(profile, &target, state, &mut self.sink, world, Some(dt));
        Ok(())
    }

    /// Make another profile active, blending or snapping to it
    pub fn switch_configuration(
        &mut self,
        index: usize,
        transition: Transition,
        world: Option<&dyn OcclusionQuery>,
    ) -> Result<(), CameraError> {
        let index = self.check_index(index).inspect_err(|e| {
            error!("Cannot switch camera profile: {}", e);
        })?;
        self.profiles[index].validate()?;
        let target = match transition {
            Transition::Blend => None,
            Transition::Snap => Some(self.bound_target()?),
        };

        self.current = index;
        self.apply_profile_settings(index);

        match target {
            None => {
                self.state.blender.start();
                debug!("Blending to camera profile '{}'", self.profiles[index].name);
            }
            Some(target) => {
                self.reset_and_place(index, &target, world);
                debug!("Snapped to camera profile '{}'", self.profiles[index].name);
            }
        }
        Ok(())
    }

    /// Kick the orbit vertically; clamped on the next update
    pub fn apply_recoil(&mut self, recoil: Vec3) {
        self.state.orbit.apply_recoil(recoil);
    }

    /// Override the follow distance the rig blends toward until the next switch.
    /// Clamped to the same `0..=1` range profiles are validated against.
    pub fn set_cached_follow_distance(&mut self, distance: f32) {
        if !distance.is_finite() {
            warn!("Ignoring non-finite follow distance {}", distance);
            return;
        }
        self.cached_follow_distance = distance.clamp(0.0, 1.0);
        self.state.blender.start();
    }

    pub fn cached_follow_distance(&self) -> f32 {
        self.cached_follow_distance
    }

    /// Whether a profile transition is still blending
    pub fn is_transitioning(&self) -> bool {
        self.state.blender.is_transitioning()
    }

    pub fn state(&self) -> &RigState {
        &self.state
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.state.orbit
    }

    pub fn smoothed(&self) -> &SmoothedParameters {
        &self.state.smoothed
    }

    pub fn polarity(&self) -> InputPolarity {
        self.polarity
    }

    /// Aim pitch in `[-1, 1]` for animation consumers
    pub fn aim_pitch(&self) -> f32 {
        self.state.orbit.aim_pitch()
    }

    /// Current look goal for the bound target
    pub fn look_goal(&self) -> Result<Vec3, CameraError> {
        let index = self.active_index()?;
        let target = self.bound_target()?;
        let state = &self.state;
        Ok(compute_look_goal(
            &target,
            &self.profiles[index],
            &state.smoothed,
            &state.orbit,
        ))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Resolve goals and write the camera pose. `dt` of `None` places without smoothing.
    fn place(
        profile: &CameraProfile,
        target: &Transform,
        state: &mut RigState,
        sink: &mut S,
        world: Option<&dyn OcclusionQuery>,
        dt: Option<f32>,
    ) {
        let goal = compute_position_goal(
            target,
            profile,
            &state.smoothed,
            &state.orbit,
            world,
            &mut state.occlusion,
        );
        let look = compute_look_goal(target, profile, &state.smoothed, &state.orbit);

        let camera = &mut state.camera;
        match dt {
            Some(dt) => {
                camera.position = snap_lerp_vec3(camera.position, goal.position, profile.move_speed * dt);
                if let Some(rotation) = Transform::look_rotation(camera.position, look, Vec3::Y) {
                    let t = (profile.look_speed * dt).clamp(0.0, 1.0);
                    camera.rotation = camera.rotation.slerp(rotation, t);
                }
            }
            None => {
                camera.position = goal.position;
                camera.look_at(look, Vec3::Y);
            }
        }

        sink.set_transform(camera.position, camera.rotation, look);
        sink.set_field_of_view(state.smoothed.field_of_view);
        // Placements resync the sink even when the line of sight is clear
        let near_clip = goal.near_clip.or(dt.is_none().then_some(NEAR_CLIP_DEFAULT));
        if let Some(near_clip) = near_clip {
            sink.set_near_clip(near_clip);
        }
    }
}
