//! VAT playback core (renderer-agnostic).
//!
//! Plays back vertex-animation-texture clips by publishing timing parameters
//! instead of ticking frames on the CPU. Two tracks (A/B) crossfade between
//! clips or multi-clip sequences; the renderer derives the visible frame from
//! the published absolute start times.
//!
//! Flow: command → [`PlaybackStateMachine`] → [`StateSnapshot`] →
//! [`StateProjector`] (diffed) → [`RenderTarget`]. [`VatController`] wires the
//! pieces together for one render target.

pub mod blend;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod evaluate;
pub mod inputs;
pub mod machine;
pub mod projector;
pub mod snapshot;
pub mod track;

// Re-exports for hosts
pub use blend::{BlendDirection, BlendState};
pub use catalog::{parse_catalog_json, Clip, ClipCatalog};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ControllerConfig, PlaybackConfig, StartupPolicy};
pub use controller::VatController;
pub use error::{CatalogError, CommandError, ConfigError};
pub use evaluate::{evaluate, sample_track, Evaluation, FrameSample};
pub use inputs::PlaybackCommand;
pub use machine::PlaybackStateMachine;
pub use projector::{project_params, RecordingTarget, RenderTarget, StateProjector};
pub use snapshot::{StateSnapshot, TrackSnapshot, SNAPSHOT_EPSILON};
pub use track::Track;
pub use vat_params_core::{ParamBatch, ParamKey, ParamValue, SharedParam, Slot, TrackParam};
