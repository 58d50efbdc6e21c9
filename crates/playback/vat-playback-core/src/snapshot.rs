//! Value snapshot of playback state at an instant.
//!
//! Snapshots are recomputed on every pull and compared by value: integers
//! exactly, floats within [`SNAPSHOT_EPSILON`]. The projector relies on
//! [`StateSnapshot::approx_eq`] to skip redundant publications.

use serde::{Deserialize, Serialize};
use vat_params_core::Slot;

use crate::blend::BlendState;
use crate::catalog::Clip;
use crate::track::Track;

/// Float tolerance used when diffing snapshots.
pub const SNAPSHOT_EPSILON: f32 = 1e-4;

/// One track resolved against its clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub clip_index: usize,
    pub frame_start: i32,
    pub frame_end: i32,
    pub framerate: f32,
    pub looping: bool,
    pub start_time: f32,
    pub sequence_active: bool,
    pub sequence_first_frame: Option<i32>,
    pub debug_frame_index: i32,
    pub debug_next_frame: i32,
    pub debug_interp: f32,
}

impl TrackSnapshot {
    pub(crate) fn resolve(track: &Track, clip: &Clip) -> Self {
        Self {
            clip_index: track.clip_index,
            frame_start: clip.frame_start,
            frame_end: clip.frame_end,
            framerate: clip.framerate,
            looping: clip.looping,
            start_time: track.start_time,
            sequence_active: track.sequence_active,
            sequence_first_frame: track.sequence_first_frame,
            debug_frame_index: track.debug_frame_index,
            debug_next_frame: track.debug_next_frame,
            debug_interp: track.debug_interp,
        }
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.clip_index == other.clip_index
            && self.frame_start == other.frame_start
            && self.frame_end == other.frame_end
            && self.looping == other.looping
            && self.sequence_active == other.sequence_active
            && self.sequence_first_frame == other.sequence_first_frame
            && self.debug_frame_index == other.debug_frame_index
            && self.debug_next_frame == other.debug_next_frame
            && close(self.framerate, other.framerate)
            && close(self.start_time, other.start_time)
            && close(self.debug_interp, other.debug_interp)
    }
}

/// Both tracks, the blend, and the playback-mode toggle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tracks: [TrackSnapshot; 2],
    pub blend: BlendState,
    pub gpu_timeline: bool,
}

impl StateSnapshot {
    #[inline]
    pub fn track(&self, slot: Slot) -> &TrackSnapshot {
        &self.tracks[slot.index()]
    }

    /// Track the current (or last) blend ends on.
    #[inline]
    pub fn destination(&self) -> &TrackSnapshot {
        self.track(self.blend.destination)
    }

    /// Epsilon-tolerant value equality.
    pub fn approx_eq(&self, other: &StateSnapshot) -> bool {
        self.gpu_timeline == other.gpu_timeline
            && self.blend.destination == other.blend.destination
            && self.blend.direction == other.blend.direction
            && close(self.blend.start_time, other.blend.start_time)
            && close(self.blend.duration, other.blend.duration)
            && self.tracks[0].approx_eq(&other.tracks[0])
            && self.tracks[1].approx_eq(&other.tracks[1])
    }
}

#[inline]
fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < SNAPSHOT_EPSILON
}
