//! Frame clock for the Tether workspace
//!
//! Turns raw frame deltas from the host scheduler into the clamped, scaled
//! delta times the camera rig consumes.

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Maximum delta time to keep a stalled frame from teleporting smoothed values
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Clamped delta time before scaling
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
}

impl GameTime {
    /// Create a new frame clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance the clock with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.frame_count += 1;
        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
    }

    /// Whether this frame advanced simulated time
    pub fn advanced(&self) -> bool {
        self.delta_time > 0.0
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.advanced());
        assert_eq!(time.frame_count, 1);
        assert!((time.total_time - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut time = GameTime::default();
        time.update(3.0);
        assert_eq!(time.delta_time, 0.25);

        time.update(-1.0);
        assert!(!time.advanced());
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::default();
        time.set_time_scale(0.5);
        time.update(0.02);
        assert!((time.delta_time - 0.01).abs() < 1e-7);

        time.set_time_scale(-2.0);
        time.update(0.02);
        assert!(!time.advanced());
    }
}
