//! Crossfade timing between the two tracks.

use serde::{Deserialize, Serialize};
use vat_params_core::Slot;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendDirection {
    AtoB,
    BtoA,
}

impl BlendDirection {
    /// Direction that ends on `destination`.
    #[inline]
    pub fn toward(destination: Slot) -> Self {
        match destination {
            Slot::A => BlendDirection::BtoA,
            Slot::B => BlendDirection::AtoB,
        }
    }

    #[inline]
    pub fn target(self) -> Slot {
        match self {
            BlendDirection::AtoB => Slot::B,
            BlendDirection::BtoA => Slot::A,
        }
    }
}

/// Which track is the destination, and when/how long the blend toward it runs.
///
/// A duration of zero is an instant cut. Completion is never signalled; it is
/// derived from `now - start_time >= duration`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendState {
    pub destination: Slot,
    pub direction: BlendDirection,
    pub start_time: f32,
    pub duration: f32,
}

impl BlendState {
    /// State right after initialization: destination A, no blend in flight.
    pub(crate) fn initial(now: f32) -> Self {
        Self {
            destination: Slot::A,
            direction: BlendDirection::AtoB,
            start_time: now,
            duration: 0.0,
        }
    }

    /// Start a blend toward `destination`. Non-positive (or NaN) durations become a cut.
    pub(crate) fn toward(destination: Slot, now: f32, duration: f32) -> Self {
        Self {
            destination,
            direction: BlendDirection::toward(destination),
            start_time: now,
            duration: if duration > 0.0 { duration } else { 0.0 },
        }
    }

    #[inline]
    pub fn is_cut(&self) -> bool {
        self.duration <= 0.0
    }

    /// Normalized progress in `[0, 1]` at absolute time `now`.
    pub fn progress_at(&self, now: f32) -> f32 {
        if self.is_cut() {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete_at(&self, now: f32) -> bool {
        now - self.start_time >= self.duration
    }
}
