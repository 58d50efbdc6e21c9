//! Serializable play commands.
//!
//! Hosts that drive controllers from data (JSON event streams, scripting
//! bridges) build these and hand them to `VatController::apply_command`.
//! Omitted transitions fall back to `PlaybackConfig::default_transition`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlaybackCommand {
    PlayIndex {
        index: i32,
        #[serde(default)]
        transition: Option<f32>,
    },
    Play {
        name: String,
        #[serde(default)]
        transition: Option<f32>,
    },
    PlayRandomStart {
        index: i32,
        #[serde(default)]
        transition: Option<f32>,
    },
    PlayInstant {
        index: i32,
    },
    PlaySequence {
        min: i32,
        max: i32,
        #[serde(default)]
        step_transition: Option<f32>,
        #[serde(default)]
        looping: bool,
        #[serde(default)]
        initial_transition: f32,
    },
    PlayNext {
        #[serde(default)]
        transition: Option<f32>,
    },
}
