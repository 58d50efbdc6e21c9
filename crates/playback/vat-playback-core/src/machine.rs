//! PlaybackStateMachine: two tracks, one blend, and the play commands that move them.
//!
//! Commands only publish absolute timestamps. The visible frame is derived
//! downstream from `now - start_time`, so nothing here advances per tick.
//!
//! Methods:
//! - initialize, play_index, play, play_index_random_start, play_sequence, play_next
//! - update_and_get_state / snapshot (pure reads)

use std::rc::Rc;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vat_params_core::Slot;

use crate::blend::BlendState;
use crate::catalog::ClipCatalog;
use crate::clock::Clock;
use crate::config::PlaybackConfig;
use crate::error::CommandError;
use crate::snapshot::{StateSnapshot, TrackSnapshot};
use crate::track::Track;

pub struct PlaybackStateMachine {
    catalog: Option<Rc<ClipCatalog>>,
    initialized: bool,
    tracks: [Track; 2],
    blend: BlendState,
    gpu_timeline: bool,
    clock: Rc<dyn Clock>,
    rng: StdRng,
}

impl std::fmt::Debug for PlaybackStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackStateMachine")
            .field("initialized", &self.initialized)
            .field("clips", &self.catalog.as_ref().map(|c| c.len()))
            .field("tracks", &self.tracks)
            .field("blend", &self.blend)
            .finish()
    }
}

impl PlaybackStateMachine {
    /// Create an uninitialized machine. Every command is a no-op until
    /// [`initialize`](Self::initialize) succeeds.
    pub fn new(clock: Rc<dyn Clock>, cfg: &PlaybackConfig) -> Self {
        let rng = match cfg.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            catalog: None,
            initialized: false,
            tracks: [Track::on_clip(0, 0, 0.0), Track::on_clip(0, 0, 0.0)],
            blend: BlendState::initial(0.0),
            gpu_timeline: cfg.gpu_timeline,
            clock,
            rng,
        }
    }

    /// Create a machine that knows its catalog but initializes lazily, on the
    /// first play command, at that command's clip.
    pub fn with_catalog(
        catalog: Rc<ClipCatalog>,
        clock: Rc<dyn Clock>,
        cfg: &PlaybackConfig,
    ) -> Self {
        let mut m = Self::new(clock, cfg);
        m.catalog = Some(catalog);
        m
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn catalog(&self) -> Option<&ClipCatalog> {
        self.catalog.as_deref()
    }

    #[inline]
    pub fn track(&self, slot: Slot) -> &Track {
        &self.tracks[slot.index()]
    }

    #[inline]
    pub fn blend(&self) -> &BlendState {
        &self.blend
    }

    /// Slot the last command wrote to.
    #[inline]
    pub fn destination(&self) -> Slot {
        self.blend.destination
    }

    /// One-shot setup: both tracks on `catalog[start_index]` at its first frame,
    /// no blend, no sequence. `start_index` is clamped into the catalog.
    ///
    /// A second call is rejected with `DoubleInitialize`. An empty catalog is
    /// rejected with `EmptyCatalog` and the machine stays inert.
    pub fn initialize(
        &mut self,
        catalog: Rc<ClipCatalog>,
        start_index: i32,
    ) -> Result<(), CommandError> {
        if self.initialized {
            return Err(CommandError::DoubleInitialize);
        }
        if catalog.is_empty() {
            return Err(CommandError::EmptyCatalog);
        }
        let index = start_index.clamp(0, catalog.len() as i32 - 1) as usize;
        let frame = catalog[index].frame_start;
        let now = self.clock.now();

        self.tracks = [
            Track::on_clip(index, frame, now),
            Track::on_clip(index, frame, now),
        ];
        self.blend = BlendState::initial(now);
        self.catalog = Some(catalog);
        self.initialized = true;
        debug!("playback initialized on clip {index} at t={now}");
        Ok(())
    }

    /// Play clip `index`, crossfading over `transition` seconds. A non-positive
    /// transition cuts. Either way the destination alternates to the other slot.
    pub fn play_index(&mut self, index: i32, transition: f32) -> Result<(), CommandError> {
        let catalog = self.require_catalog()?;
        let index = resolve_index(&catalog, index)?;
        if !self.initialized {
            return self.initialize(catalog, index as i32);
        }
        let frame = catalog[index].frame_start;
        let now = self.clock.now();
        let slot = self.begin_transition(transition, now);
        self.tracks[slot.index()] = Track::on_clip(index, frame, now);
        Ok(())
    }

    /// Play the first clip named `name`.
    pub fn play(&mut self, name: &str, transition: f32) -> Result<(), CommandError> {
        let catalog = self.require_catalog()?;
        let index = catalog
            .find(name)
            .ok_or_else(|| CommandError::UnresolvedName(name.to_string()))?;
        self.play_index(index as i32, transition)
    }

    /// Like [`play_index`](Self::play_index), but the track starts on a frame
    /// drawn uniformly from the clip's inclusive range. The published start time
    /// is backdated so time-based evaluation lands on that frame right away.
    pub fn play_index_random_start(
        &mut self,
        index: i32,
        transition: f32,
    ) -> Result<(), CommandError> {
        let catalog = self.require_catalog()?;
        let index = resolve_index(&catalog, index)?;
        let clip = &catalog[index];
        let frame = self.rng.random_range(clip.frame_start..=clip.frame_end);
        let now = self.clock.now();
        let start_time = now - clip.seconds_to(frame);

        if !self.initialized {
            self.initialize(catalog.clone(), index as i32)?;
            for slot in Slot::BOTH {
                self.tracks[slot.index()] = Track::on_clip(index, frame, start_time);
            }
            return Ok(());
        }

        let slot = self.begin_transition(transition, now);
        self.tracks[slot.index()] = Track::on_clip(index, frame, start_time);
        Ok(())
    }

    /// Play clips `min_index..=max_index` as one continuous timeline on the
    /// destination track. The track takes the last clip's bounds, rate and loop
    /// flag; its sequence-first-frame is the first clip's start frame.
    ///
    /// A positive `initial_transition` crossfades into the sequence over
    /// `step_transition` seconds; otherwise the sequence cuts in. `looping` is
    /// accepted for callers but not published: the last clip's `looping` flag
    /// decides whether the span wraps.
    pub fn play_sequence(
        &mut self,
        min_index: i32,
        max_index: i32,
        step_transition: f32,
        looping: bool,
        initial_transition: f32,
    ) -> Result<(), CommandError> {
        let catalog = self.require_catalog()?;
        let len = catalog.len();
        if min_index < 0 || max_index < 0 || max_index as usize >= len || min_index > max_index {
            return Err(CommandError::InvalidSequenceRange {
                min: min_index,
                max: max_index,
                len,
            });
        }
        let (first, last) = (min_index as usize, max_index as usize);
        if !self.initialized {
            self.initialize(catalog.clone(), min_index)?;
        }

        let first_frame = catalog[first].frame_start;
        let last_frame = catalog[last].frame_start;
        let now = self.clock.now();
        let blend_duration = if initial_transition > 0.0 {
            step_transition
        } else {
            0.0
        };
        let slot = self.begin_transition(blend_duration, now);
        self.tracks[slot.index()] = Track::on_sequence(last, last_frame, first_frame, now);
        self.tracks[slot.other().index()].sequence_active = false;
        debug!(
            "sequence {first}..={last} on track {} (step {step_transition}s, loop {looping})",
            slot.suffix()
        );
        Ok(())
    }

    /// Advance to the clip after the destination track's, wrapping at the end.
    pub fn play_next(&mut self, transition: f32) -> Result<(), CommandError> {
        let catalog = self.require_catalog()?;
        if catalog.is_empty() {
            return Err(CommandError::EmptyCatalog);
        }
        let next = if self.initialized {
            (self.track(self.destination()).clip_index + 1) % catalog.len()
        } else {
            0
        };
        self.play_index(next as i32, transition)
    }

    /// Current snapshot. `delta_time` is accepted for hosts that tick per frame
    /// but does not influence the result: calls at the same instant, with any
    /// delta, return equal snapshots. `None` until initialized.
    pub fn update_and_get_state(&self, _delta_time: f32) -> Option<StateSnapshot> {
        self.snapshot()
    }

    pub fn snapshot(&self) -> Option<StateSnapshot> {
        if !self.initialized {
            return None;
        }
        let catalog = self.catalog.as_deref()?;
        let resolve = |slot: Slot| {
            let track = self.track(slot);
            catalog
                .get(track.clip_index)
                .map(|clip| TrackSnapshot::resolve(track, clip))
        };
        Some(StateSnapshot {
            tracks: [resolve(Slot::A)?, resolve(Slot::B)?],
            blend: self.blend,
            gpu_timeline: self.gpu_timeline,
        })
    }

    fn require_catalog(&self) -> Result<Rc<ClipCatalog>, CommandError> {
        self.catalog.clone().ok_or(CommandError::Uninitialized)
    }

    /// Flip the destination and restart the blend timer toward it.
    fn begin_transition(&mut self, transition: f32, now: f32) -> Slot {
        let slot = self.blend.destination.other();
        self.blend = BlendState::toward(slot, now, transition);
        slot
    }
}

fn resolve_index(catalog: &ClipCatalog, index: i32) -> Result<usize, CommandError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < catalog.len())
        .ok_or(CommandError::InvalidIndex {
            index,
            len: catalog.len(),
        })
}
