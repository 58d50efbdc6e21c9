//! Playback tracks. Two of them (slots A and B) are crossfaded by the blend state.

use serde::{Deserialize, Serialize};

/// One playback slot's clip reference and absolute start time.
///
/// While `sequence_active` is set, `clip_index` names the *last* clip of the
/// sequence (its bounds, rate and loop flag govern the ongoing playback) and
/// `sequence_first_frame` is the first frame of the *first* clip, which anchors
/// elapsed-time reconstruction of the whole span.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub clip_index: usize,
    /// Absolute time at which the track's clip (or sequence) started.
    pub start_time: f32,
    pub sequence_active: bool,
    pub sequence_first_frame: Option<i32>,
    /// CPU-side frame bookkeeping, set when the track is written; not advanced per tick.
    pub debug_frame_index: i32,
    pub debug_next_frame: i32,
    pub debug_interp: f32,
}

impl Track {
    /// A track playing one clip from `start_frame`.
    pub(crate) fn on_clip(clip_index: usize, start_frame: i32, start_time: f32) -> Self {
        Self {
            clip_index,
            start_time,
            sequence_active: false,
            sequence_first_frame: None,
            debug_frame_index: start_frame,
            debug_next_frame: start_frame.saturating_add(1),
            debug_interp: 0.0,
        }
    }

    /// A track playing a sequence ending on `last_index` and starting at `first_frame`.
    pub(crate) fn on_sequence(
        last_index: usize,
        last_start_frame: i32,
        first_frame: i32,
        start_time: f32,
    ) -> Self {
        Self {
            sequence_active: true,
            sequence_first_frame: Some(first_frame),
            ..Self::on_clip(last_index, last_start_frame, start_time)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_track_keeps_last_clip_and_first_frame() {
        let t = Track::on_sequence(5, 120, 40, 2.0);
        assert_eq!(t.clip_index, 5);
        assert!(t.sequence_active);
        assert_eq!(t.sequence_first_frame, Some(40));
        assert_eq!(t.debug_frame_index, 120);
        assert_eq!(t.debug_next_frame, 121);
    }
}
