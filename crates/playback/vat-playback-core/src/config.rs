//! Controller and playback configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Playback settings shared by every state machine a controller builds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Crossfade used by commands that omit a transition time (seconds).
    pub default_transition: f32,
    /// Published playback-mode toggle; selects the shader's time-evaluated path.
    pub gpu_timeline: bool,
    /// Seed for random start frames. `None` seeds from the OS.
    pub random_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_transition: 0.25,
            gpu_timeline: true,
            random_seed: None,
        }
    }
}

/// What a controller plays when it activates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StartupPolicy {
    /// Start on one clip.
    Single { index: i32 },
    /// Initialize on clip `index`, then cut into the sequence `start..=end`.
    Sequence {
        #[serde(default)]
        index: i32,
        start: i32,
        end: i32,
        #[serde(default = "default_step_transition")]
        step_transition: f32,
        #[serde(default)]
        looping: bool,
    },
}

fn default_step_transition() -> f32 {
    0.25
}

impl Default for StartupPolicy {
    fn default() -> Self {
        StartupPolicy::Single { index: 0 }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    pub startup: StartupPolicy,
    pub playback: PlaybackConfig,
}

impl ControllerConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}
