use std::path::PathBuf;

/// Faults reported by the camera rig. None of them leave the rig half-updated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("no camera profiles configured")]
    NoProfiles,

    #[error("profile index {index} is out of range ({len} profiles)")]
    ProfileOutOfRange { index: usize, len: usize },

    #[error("no follow target bound to the camera rig")]
    MissingTarget,

    #[error("invalid camera profile '{profile}': {reason}")]
    InvalidProfile { profile: String, reason: String },
}

/// Errors that can occur while loading profile files.
#[derive(Debug, thiserror::Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile file '{0}': {1}")]
    Io(PathBuf, std::io::Error),

    #[error("failed to parse TOML profiles: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON profiles: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported profile file format: '{0}' (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Invalid(#[from] CameraError),
}
