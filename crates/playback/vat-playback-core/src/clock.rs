//! Absolute time source.
//!
//! Published start times are absolute seconds on the same clock the shader
//! reads. The state machine asks an injected [`Clock`] instead of a global.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub trait Clock {
    /// Current absolute time in seconds.
    fn now(&self) -> f32;
}

/// Wall clock measured from its own creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f32 {
        self.origin.elapsed().as_secs_f32()
    }
}

/// Hand-driven clock. Clones share the same time, so a host (or test) keeps one
/// handle to advance while the state machine reads through another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new(start: f32) -> Self {
        Self {
            time: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, t: f32) {
        self.time.set(t);
    }

    pub fn advance(&self, dt: f32) {
        self.time.set(self.time.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f32 {
        self.time.get()
    }
}
