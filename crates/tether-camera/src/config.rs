//! Camera profile configuration

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tether_physics::ALL_LAYERS;
use tracing::info;

use crate::error::{CameraError, ProfileLoadError};

/// How much freedom the player has to orbit the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// No orbiting; the camera sits at a fixed offset from the target
    Fixed,
    /// Vertical orbiting only, like an over-the-shoulder shooter camera
    #[default]
    FreeVerticalFixedHorizontal,
    /// Full vertical and horizontal orbiting around the target
    FreeOrbit,
}

/// One named camera behavior profile. Never mutated by the rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraProfile {
    /// Profile name used in logs and lookups
    pub name: String,
    /// Free-form designer notes
    pub description: String,
    /// Orbit freedom
    pub mode: CameraMode,
    /// Speed at which the camera moves onto its position goal
    pub move_speed: f32,
    /// Speed at which the camera turns toward its look goal
    pub look_speed: f32,
    /// Pivot point relative to the follow target, roughly at the collar bone
    pub anchor_offset: Vec3,
    /// Distance from the anchor along the orbit direction (0-1)
    pub follow_distance: f32,
    /// Height above the anchor, perpendicular to the orbit, that the camera orbits at
    pub orbit_height: f32,
    /// Lateral offset from the anchor point
    pub side_offset: f32,
    /// Highest vertical component the orbit vector may reach (0-1)
    pub max_tilt: f32,
    /// Lowest vertical component the orbit vector may reach (-1-0)
    pub min_tilt: f32,
    /// How far in front of the target the camera looks
    pub look_ahead_distance: f32,
    /// Field of view goal in degrees
    pub field_of_view: f32,
    /// Blend speed for offsets and distances when switching to this profile
    pub offset_transition_speed: f32,
    /// Blend speed for field of view and look-ahead when switching to this profile
    pub fov_transition_speed: f32,
    /// Pull the camera in front of geometry between it and the anchor
    pub handle_occlusion: bool,
    /// Layers that count as occluders
    pub occlusion_mask: u32,
    /// Invert horizontal input
    pub negate_horizontal: bool,
    /// Invert vertical input
    pub negate_vertical: bool,
}

impl Default for CameraProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: String::new(),
            mode: CameraMode::FreeVerticalFixedHorizontal,
            move_speed: 810.0,
            look_speed: 200.0,
            anchor_offset: Vec3::new(0.0, 1.4, 0.0),
            follow_distance: 0.646,
            orbit_height: 0.488,
            side_offset: 0.311,
            max_tilt: 0.81,
            min_tilt: -0.865,
            look_ahead_distance: 2.56,
            field_of_view: 60.0,
            offset_transition_speed: 6.6,
            fov_transition_speed: 5.1,
            handle_occlusion: true,
            occlusion_mask: ALL_LAYERS,
            negate_horizontal: false,
            negate_vertical: false,
        }
    }
}

impl CameraProfile {
    /// Create a default profile with the given name and mode
    pub fn named(name: impl Into<String>, mode: CameraMode) -> Self {
        Self {
            name: name.into(),
            mode,
            ..Default::default()
        }
    }

    /// Check ranges that would otherwise produce NaN or a blend that never settles
    pub fn validate(&self) -> Result<(), CameraError> {
        let invalid = |reason: String| CameraError::InvalidProfile {
            profile: self.name.clone(),
            reason,
        };

        if !(0.0..=1.0).contains(&self.max_tilt) {
            return Err(invalid(format!("max_tilt {} must be within 0..=1", self.max_tilt)));
        }
        if !(-1.0..=0.0).contains(&self.min_tilt) {
            return Err(invalid(format!("min_tilt {} must be within -1..=0", self.min_tilt)));
        }
        if !(0.0..=1.0).contains(&self.follow_distance) {
            return Err(invalid(format!(
                "follow_distance {} must be within 0..=1",
                self.follow_distance
            )));
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return Err(invalid(format!(
                "field_of_view {} must be within 0..180 degrees",
                self.field_of_view
            )));
        }

        let speeds = [
            ("move_speed", self.move_speed),
            ("look_speed", self.look_speed),
            ("offset_transition_speed", self.offset_transition_speed),
            ("fov_transition_speed", self.fov_transition_speed),
        ];
        for (field, speed) in speeds {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(invalid(format!("{field} {speed} must be a positive number")));
            }
        }

        let lengths = [
            ("orbit_height", self.orbit_height),
            ("side_offset", self.side_offset),
            ("look_ahead_distance", self.look_ahead_distance),
        ];
        for (field, value) in lengths {
            if !value.is_finite() {
                return Err(invalid(format!("{field} must be finite")));
            }
        }
        if !self.anchor_offset.is_finite() {
            return Err(invalid("anchor_offset must be finite".to_string()));
        }

        Ok(())
    }
}

/// Ordered list of profiles as authored in a profile file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    pub profiles: Vec<CameraProfile>,
}

impl ProfileSet {
    /// Built-in profiles used when no profile file is supplied
    pub fn presets() -> Self {
        let explore = CameraProfile {
            description: "Over-the-shoulder follow camera".to_string(),
            ..CameraProfile::named("explore", CameraMode::FreeVerticalFixedHorizontal)
        };
        let aim = CameraProfile {
            description: "Tight shoulder view for aiming".to_string(),
            anchor_offset: Vec3::new(0.0, 1.5, 0.1),
            follow_distance: 0.35,
            side_offset: 0.45,
            orbit_height: 0.3,
            look_ahead_distance: 6.0,
            field_of_view: 42.0,
            ..CameraProfile::named("aim", CameraMode::FreeVerticalFixedHorizontal)
        };
        let orbit = CameraProfile {
            description: "Free orbit for exploration".to_string(),
            follow_distance: 1.0,
            side_offset: 0.0,
            orbit_height: 0.0,
            field_of_view: 70.0,
            ..CameraProfile::named("orbit", CameraMode::FreeOrbit)
        };
        let cinematic = CameraProfile {
            description: "Locked camera for scripted moments".to_string(),
            follow_distance: 0.9,
            side_offset: 0.0,
            handle_occlusion: false,
            ..CameraProfile::named("cinematic", CameraMode::Fixed)
        };

        Self {
            profiles: vec![explore, aim, orbit, cinematic],
        }
    }

    /// Parse and validate a TOML profile list (`[[profiles]]` tables)
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileLoadError> {
        let set: Self = toml::from_str(content)?;
        set.validate()?;
        Ok(set)
    }

    /// Parse and validate a JSON profile list (`{ "profiles": [...] }`)
    pub fn from_json_str(content: &str) -> Result<Self, ProfileLoadError> {
        let set: Self = serde_json::from_str(content)?;
        set.validate()?;
        Ok(set)
    }

    /// Load a profile file, choosing the format from its extension
    pub fn load(path: &Path) -> Result<Self, ProfileLoadError> {
        let content =
            fs::read_to_string(path).map_err(|e| ProfileLoadError::Io(path.to_path_buf(), e))?;

        let set = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => return Err(ProfileLoadError::UnsupportedFormat(path.to_path_buf())),
        };

        info!("Loaded {} camera profiles from {:?}", set.profiles.len(), path);
        Ok(set)
    }

    /// Reject empty lists and any invalid profile
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.profiles.is_empty() {
            return Err(CameraError::NoProfiles);
        }
        self.profiles.iter().try_for_each(CameraProfile::validate)
    }

    /// Find a profile index by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == name)
    }

    /// Hand the profiles to a rig
    pub fn into_profiles(self) -> Vec<CameraProfile> {
        self.profiles
    }
}
