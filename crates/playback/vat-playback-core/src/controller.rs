//! VatController: one state machine and one projector for one render target.
//!
//! Activation always builds a fresh state machine: reactivating restarts from
//! the startup policy and never resumes a blend. Every play command is followed
//! by a non-forced publish; rejected commands are logged and otherwise ignored.

use std::rc::Rc;

use log::debug;

use crate::catalog::ClipCatalog;
use crate::clock::Clock;
use crate::config::{ControllerConfig, StartupPolicy};
use crate::error::CommandError;
use crate::inputs::PlaybackCommand;
use crate::machine::PlaybackStateMachine;
use crate::projector::{RenderTarget, StateProjector};
use crate::snapshot::StateSnapshot;

pub struct VatController<T: RenderTarget> {
    config: ControllerConfig,
    catalog: Option<Rc<ClipCatalog>>,
    clock: Rc<dyn Clock>,
    machine: Option<PlaybackStateMachine>,
    projector: StateProjector<T>,
}

impl<T: RenderTarget> VatController<T> {
    /// Build an inactive controller. Call [`activate`](Self::activate) before playing.
    pub fn new(
        config: ControllerConfig,
        catalog: Option<Rc<ClipCatalog>>,
        clock: Rc<dyn Clock>,
        target: T,
    ) -> Self {
        Self {
            config,
            catalog,
            clock,
            machine: None,
            projector: StateProjector::new(target),
        }
    }

    /// Start (or restart) playback: fresh machine, startup policy, forced publish.
    pub fn activate(&mut self) {
        let mut machine = PlaybackStateMachine::new(self.clock.clone(), &self.config.playback);
        self.projector.reset();

        let Some(catalog) = self.catalog.clone().filter(|c| !c.is_empty()) else {
            debug!("controller activated without clips; staying inert");
            self.machine = Some(machine);
            return;
        };
        let last = catalog.len() as i32 - 1;

        match self.config.startup {
            StartupPolicy::Single { index } => {
                let start = index.clamp(0, last);
                if let Err(err) = machine.initialize(catalog, start) {
                    debug!("startup initialize ignored: {err}");
                }
            }
            StartupPolicy::Sequence {
                index,
                start,
                end,
                step_transition,
                looping,
            } => {
                let (start, end) = (start.clamp(0, last), end.clamp(0, last));
                if let Err(err) = machine.initialize(catalog, index.clamp(0, last)) {
                    debug!("startup initialize ignored: {err}");
                }
                // Startup sequences cut in.
                if let Err(err) = machine.play_sequence(start, end, step_transition, looping, 0.0) {
                    debug!("startup sequence ignored: {err}");
                }
            }
        }
        debug!("controller activated with {:?}", self.config.startup);

        self.machine = Some(machine);
        self.apply_state(0.0, true);
    }

    /// Drop the state machine. Commands are no-ops until the next activation.
    pub fn deactivate(&mut self) {
        self.machine = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.machine.is_some()
    }

    /// Replace the catalog. Takes effect on the next activation.
    pub fn set_catalog(&mut self, catalog: Option<Rc<ClipCatalog>>) {
        self.catalog = catalog;
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn play_index(&mut self, index: i32, transition: f32) {
        self.command("play_index", |m| m.play_index(index, transition));
    }

    pub fn play(&mut self, name: &str, transition: f32) {
        self.command("play", |m| m.play(name, transition));
    }

    /// Cut straight to `index`.
    pub fn play_instant(&mut self, index: i32) {
        self.command("play_instant", |m| m.play_index(index, 0.0));
    }

    pub fn play_index_random_start(&mut self, index: i32, transition: f32) {
        self.command("play_index_random_start", |m| {
            m.play_index_random_start(index, transition)
        });
    }

    pub fn play_sequence(
        &mut self,
        min_index: i32,
        max_index: i32,
        step_transition: f32,
        looping: bool,
        initial_transition: f32,
    ) {
        self.command("play_sequence", |m| {
            m.play_sequence(min_index, max_index, step_transition, looping, initial_transition)
        });
    }

    pub fn play_next(&mut self, transition: f32) {
        self.command("play_next", |m| m.play_next(transition));
    }

    pub fn apply_command(&mut self, cmd: &PlaybackCommand) {
        let fallback = self.config.playback.default_transition;
        match cmd {
            PlaybackCommand::PlayIndex { index, transition } => {
                self.play_index(*index, transition.unwrap_or(fallback))
            }
            PlaybackCommand::Play { name, transition } => {
                self.play(name, transition.unwrap_or(fallback))
            }
            PlaybackCommand::PlayRandomStart { index, transition } => {
                self.play_index_random_start(*index, transition.unwrap_or(fallback))
            }
            PlaybackCommand::PlayInstant { index } => self.play_instant(*index),
            PlaybackCommand::PlaySequence {
                min,
                max,
                step_transition,
                looping,
                initial_transition,
            } => self.play_sequence(
                *min,
                *max,
                step_transition.unwrap_or(fallback),
                *looping,
                *initial_transition,
            ),
            PlaybackCommand::PlayNext { transition } => {
                self.play_next(transition.unwrap_or(fallback))
            }
        }
    }

    /// Per-frame pull. Publishes only if the state differs from the last write.
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.apply_state(delta_time, false)
    }

    pub fn snapshot(&self) -> Option<StateSnapshot> {
        self.machine.as_ref().and_then(|m| m.snapshot())
    }

    pub fn machine(&self) -> Option<&PlaybackStateMachine> {
        self.machine.as_ref()
    }

    /// Whether a crossfade is still running at the clock's current time.
    pub fn is_blending(&self) -> bool {
        self.machine
            .as_ref()
            .filter(|m| m.is_initialized())
            .is_some_and(|m| !m.blend().is_complete_at(self.clock.now()))
    }

    pub fn projector(&self) -> &StateProjector<T> {
        &self.projector
    }

    pub fn target(&self) -> &T {
        self.projector.target()
    }

    pub fn target_mut(&mut self) -> &mut T {
        self.projector.target_mut()
    }

    fn command(
        &mut self,
        op: &str,
        f: impl FnOnce(&mut PlaybackStateMachine) -> Result<(), CommandError>,
    ) {
        let Some(machine) = self.machine.as_mut() else {
            debug!("{op} ignored: controller is not active");
            return;
        };
        if let Err(err) = f(machine) {
            debug!("{op} ignored: {err}");
        }
        self.apply_state(0.0, false);
    }

    fn apply_state(&mut self, delta_time: f32, force: bool) -> bool {
        let Some(snapshot) = self
            .machine
            .as_ref()
            .and_then(|m| m.update_and_get_state(delta_time))
        else {
            return false;
        };
        self.projector.apply_state(&snapshot, force)
    }
}
