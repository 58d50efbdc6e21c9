//! CPU reference for the shader's time-evaluated path.
//!
//! Given a published snapshot and an absolute time, derive the frame pair and
//! interpolation each track shows and the weight of track B in the crossfade.
//! Hosts use this for CPU-side previews and tests use it to check what a
//! publication actually displays. Nothing here feeds back into the state machine.

use serde::{Deserialize, Serialize};

use crate::blend::{BlendDirection, BlendState};
use crate::snapshot::{StateSnapshot, TrackSnapshot};

/// Tolerance added before flooring a frame position, absorbing f32 error in
/// `now - start_time` when a start time was backdated to land on a frame.
const FRAME_EPSILON: f32 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub frame: i32,
    pub next_frame: i32,
    pub interp: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub a: FrameSample,
    pub b: FrameSample,
    /// Contribution of track B; track A contributes `1 - weight_b`.
    pub weight_b: f32,
}

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if m < 0.0 {
        m + b
    } else {
        m
    }
}

/// Frame shown by one track at absolute time `now`.
///
/// A sequence track walks from its sequence-first-frame to the last clip's end
/// at the last clip's rate. Looping tracks wrap after the last frame; others
/// hold it.
pub fn sample_track(t: &TrackSnapshot, now: f32) -> FrameSample {
    // Frame arithmetic is widened so extreme clip bounds cannot overflow.
    let first = i64::from(match (t.sequence_active, t.sequence_first_frame) {
        (true, Some(f)) => f,
        _ => t.frame_start,
    });
    let last = i64::from(t.frame_end).max(first);
    let span = last - first;
    let sample = |frame: i64, next_frame: i64, interp: f32| FrameSample {
        frame: frame as i32,
        next_frame: next_frame as i32,
        interp,
    };
    if span == 0 {
        return sample(first, first, 0.0);
    }

    let pos = (now - t.start_time).max(0.0) * t.framerate;
    if t.looping {
        let p = fmod(pos, (span + 1) as f32);
        let base = (p + FRAME_EPSILON).floor();
        let frame = (first + base as i64).min(last);
        let next_frame = if frame >= last { first } else { frame + 1 };
        sample(frame, next_frame, (p - base).max(0.0))
    } else {
        let p = pos.min(span as f32);
        let base = (p + FRAME_EPSILON).floor();
        let frame = first + base as i64;
        if frame >= last {
            sample(last, last, 0.0)
        } else {
            sample(frame, frame + 1, (p - base).max(0.0))
        }
    }
}

/// Weight of track B at `now`.
pub fn blend_weight_b(blend: &BlendState, now: f32) -> f32 {
    let p = blend.progress_at(now);
    match blend.direction {
        BlendDirection::AtoB => p,
        BlendDirection::BtoA => 1.0 - p,
    }
}

pub fn evaluate(s: &StateSnapshot, now: f32) -> Evaluation {
    Evaluation {
        a: sample_track(&s.tracks[0], now),
        b: sample_track(&s.tracks[1], now),
        weight_b: blend_weight_b(&s.blend, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vat_params_core::Slot;

    fn track(start: i32, end: i32, fps: f32, looping: bool, t0: f32) -> TrackSnapshot {
        TrackSnapshot {
            clip_index: 0,
            frame_start: start,
            frame_end: end,
            framerate: fps,
            looping,
            start_time: t0,
            sequence_active: false,
            sequence_first_frame: None,
            debug_frame_index: start,
            debug_next_frame: start + 1,
            debug_interp: 0.0,
        }
    }

    #[test]
    fn looping_track_wraps() {
        let t = track(10, 19, 10.0, true, 1.0);
        assert_eq!(sample_track(&t, 1.0).frame, 10);
        let mid = sample_track(&t, 1.25);
        assert_eq!(mid.frame, 12);
        assert_eq!(mid.next_frame, 13);
        assert!((mid.interp - 0.5).abs() < 1e-3);
        let end = sample_track(&t, 1.95);
        assert_eq!(end.frame, 19);
        assert_eq!(end.next_frame, 10);
        assert_eq!(sample_track(&t, 2.0).frame, 10);
    }

    #[test]
    fn clamped_track_holds_last_frame() {
        let t = track(0, 5, 10.0, false, 0.0);
        assert_eq!(sample_track(&t, 0.3).frame, 3);
        let held = sample_track(&t, 10.0);
        assert_eq!(held.frame, 5);
        assert_eq!(held.next_frame, 5);
        assert_eq!(held.interp, 0.0);
    }

    #[test]
    fn time_before_start_shows_first_frame() {
        let t = track(4, 8, 30.0, true, 5.0);
        assert_eq!(sample_track(&t, 1.0).frame, 4);
    }

    #[test]
    fn sequence_spans_from_first_clip() {
        let mut t = track(40, 59, 20.0, false, 0.0);
        t.sequence_active = true;
        t.sequence_first_frame = Some(0);
        assert_eq!(sample_track(&t, 0.0).frame, 0);
        assert_eq!(sample_track(&t, 1.0).frame, 20);
        assert_eq!(sample_track(&t, 100.0).frame, 59);
    }

    #[test]
    fn inactive_sequence_start_is_ignored() {
        let mut t = track(40, 59, 20.0, false, 0.0);
        t.sequence_first_frame = Some(0);
        assert_eq!(sample_track(&t, 0.0).frame, 40);
    }

    #[test]
    fn extreme_frame_bounds_do_not_overflow() {
        let t = track(i32::MIN, i32::MAX, 30.0, true, 0.0);
        let first = sample_track(&t, 0.0);
        assert_eq!(first.frame, i32::MIN);
        assert_eq!(first.next_frame, i32::MIN + 1);
        let held = sample_track(&track(i32::MIN, i32::MAX, 30.0, false, 0.0), 1.0e9);
        assert_eq!(held.frame, i32::MAX);
    }

    #[test]
    fn blend_weight_follows_direction() {
        let to_b = BlendState::toward(Slot::B, 0.0, 1.0);
        assert!((blend_weight_b(&to_b, 0.25) - 0.25).abs() < 1e-6);
        let to_a = BlendState::toward(Slot::A, 0.0, 1.0);
        assert!((blend_weight_b(&to_a, 0.25) - 0.75).abs() < 1e-6);
        let cut = BlendState::toward(Slot::A, 0.0, 0.0);
        assert_eq!(blend_weight_b(&cut, 0.0), 0.0);
    }
}
