//! StateProjector: snapshot → closed parameter vocabulary, written only on change.
//!
//! The projector owns its render target and the last snapshot it applied. A
//! cache is never shared between two projectors.

use log::trace;
use vat_params_core::{
    ParamBatch, ParamKey, ParamValue, SharedParam, Slot, TrackParam, VOCABULARY_LEN,
};

use crate::blend::BlendDirection;
use crate::snapshot::StateSnapshot;

/// Sink for batched parameter writes (a material property block, a uniform
/// buffer, a recorder...). Called once per publication.
pub trait RenderTarget {
    fn apply_params(&mut self, batch: &ParamBatch);
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn apply_params(&mut self, batch: &ParamBatch) {
        (**self).apply_params(batch)
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn apply_params(&mut self, batch: &ParamBatch) {
        (**self).apply_params(batch)
    }
}

/// Target that keeps the last batch and counts writes. Useful headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingTarget {
    pub writes: usize,
    pub last: Option<ParamBatch>,
}

impl RenderTarget for RecordingTarget {
    fn apply_params(&mut self, batch: &ParamBatch) {
        self.writes += 1;
        self.last = Some(batch.clone());
    }
}

/// Map a snapshot onto the full parameter vocabulary, in vocabulary order.
pub fn project_params(s: &StateSnapshot) -> ParamBatch {
    let mut batch = ParamBatch::with_capacity(VOCABULARY_LEN);
    for slot in Slot::BOTH {
        let t = s.track(slot);
        let key = |p| ParamKey::Track(slot, p);
        batch.push(key(TrackParam::FrameStart), ParamValue::Int(t.frame_start));
        batch.push(key(TrackParam::FrameEnd), ParamValue::Int(t.frame_end));
        batch.push(key(TrackParam::Framerate), ParamValue::Float(t.framerate));
        batch.push(key(TrackParam::Loop), ParamValue::flag(t.looping));
        batch.push(key(TrackParam::TimeOffset), ParamValue::Float(t.start_time));
        batch.push(
            key(TrackParam::SequenceStart),
            ParamValue::Float(t.sequence_first_frame.map_or(-1.0, |f| f as f32)),
        );
        batch.push(key(TrackParam::UseSequence), ParamValue::flag(t.sequence_active));
    }
    let shared = ParamKey::Shared;
    batch.push(
        shared(SharedParam::BlendStartTime),
        ParamValue::Float(s.blend.start_time),
    );
    batch.push(
        shared(SharedParam::BlendDuration),
        ParamValue::Float(s.blend.duration),
    );
    batch.push(
        shared(SharedParam::BlendDirection),
        ParamValue::flag(s.blend.direction == BlendDirection::AtoB),
    );
    batch.push(shared(SharedParam::GpuTimeline), ParamValue::flag(s.gpu_timeline));
    batch
}

#[derive(Debug)]
pub struct StateProjector<T: RenderTarget> {
    target: T,
    cache: Option<StateSnapshot>,
}

impl<T: RenderTarget> StateProjector<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            cache: None,
        }
    }

    /// Publish `snapshot` unless it equals (within epsilon) the last applied one.
    /// `force` publishes unconditionally. Returns whether a write happened.
    pub fn apply_state(&mut self, snapshot: &StateSnapshot, force: bool) -> bool {
        if !force {
            if let Some(last) = &self.cache {
                if last.approx_eq(snapshot) {
                    trace!("snapshot unchanged; skipping publication");
                    return false;
                }
            }
        }
        let batch = project_params(snapshot);
        trace!("publishing {} parameters (force={force})", batch.len());
        self.target.apply_params(&batch);
        self.cache = Some(snapshot.clone());
        true
    }

    /// Forget the last applied snapshot; the next non-forced apply always writes.
    pub fn reset(&mut self) {
        self.cache = None;
    }

    pub fn last_applied(&self) -> Option<&StateSnapshot> {
        self.cache.as_ref()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}
