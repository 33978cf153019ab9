//! Session controller.
//!
//! Owns the session state for one exercise and mediates between commands
//! and the countdown/sequencer pair:
//! - `idle → running` on start
//! - `running ⇄ paused` on pause (a toggle)
//! - manual navigation stops the countdown and leaves a running session paused
//! - switching exercise resets everything to idle
//!
//! Every observable change is published as a [`SessionEvent`].

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::config::TimingConfig;
use crate::exercise::Exercise;
use crate::types::{SessionPhase, SessionSnapshot};

use super::countdown::{CountdownEngine, CountdownSignal};
use super::sequencer::PhaseSequencer;

// ============================================================================
// SessionEvent / SessionCommand
// ============================================================================

/// Events published by a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Session left idle
    Started {
        /// Current step index
        step: usize,
        /// Seconds left (timed exercises only)
        remaining: Option<u32>,
    },
    /// Countdown frozen
    Paused {
        /// Seconds left (timed exercises only)
        remaining: Option<u32>,
    },
    /// Countdown restarted from the frozen value
    Resumed {
        /// Seconds left (timed exercises only)
        remaining: Option<u32>,
    },
    /// One countdown tick elapsed
    Tick {
        /// Seconds left after the tick
        remaining: u32,
    },
    /// A timed step ran out and the sequencer advanced
    PhaseExpired {
        /// Step that expired
        from: usize,
        /// Step now active
        to: usize,
        /// Duration of the new step
        remaining: u32,
    },
    /// The step index wrapped back to the first step
    CycleCompleted {
        /// Total cycles completed so far
        cycles: u32,
    },
    /// Manual navigation changed the step
    StepChanged {
        /// Step now active
        step: usize,
        /// Seconds left (timed exercises only)
        remaining: Option<u32>,
    },
    /// A different exercise was loaded
    ExerciseSwitched {
        /// Key of the new exercise
        key: String,
    },
    /// Session went back to idle on the first step
    Reset,
    /// A grounding response was stored for a step
    ResponseRecorded {
        /// Step the response belongs to
        step: usize,
    },
}

/// Commands accepted by [`Session::run`].
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Start from idle, or resume from paused
    Start,
    /// Toggle between running and paused
    Pause,
    /// Go to the next step (clamped)
    Next,
    /// Go to the previous step (clamped)
    Previous,
    /// Go to an arbitrary step (clamped)
    GoTo(isize),
    /// Back to idle on the first step
    Reset,
    /// Load a different exercise
    Switch(Arc<Exercise>),
    /// Store a grounding response for the current step
    Respond(String),
    /// Stop the driver loop
    Quit,
}

// ============================================================================
// Session
// ============================================================================

/// A single exercise session.
#[derive(Debug)]
pub struct Session {
    exercise: Arc<Exercise>,
    phase: SessionPhase,
    sequencer: PhaseSequencer,
    countdown: CountdownEngine,
    responses: BTreeMap<usize, String>,
    cycles_completed: u32,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl Session {
    /// Creates an idle session on the first step of `exercise`.
    pub fn new(
        exercise: Arc<Exercise>,
        timing: &TimingConfig,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let mut session = Self {
            exercise,
            phase: SessionPhase::Idle,
            sequencer: PhaseSequencer::new(),
            countdown: CountdownEngine::new(timing.tick_interval(), timing.settle_delay()),
            responses: BTreeMap::new(),
            cycles_completed: 0,
            event_tx,
        };
        session
            .sequencer
            .rewind(&session.exercise, &mut session.countdown);
        session
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Starts the session from idle, or resumes it from paused.
    pub fn start(&mut self) {
        match self.phase {
            SessionPhase::Idle => {
                let step = self.sequencer.index();
                if let Some(duration) = self.exercise.duration_of(step) {
                    self.countdown.arm(duration);
                    self.countdown.start();
                }
                self.phase = SessionPhase::Running;
                info!(key = self.exercise.key(), step, "session started");
                self.emit(SessionEvent::Started {
                    step,
                    remaining: self.remaining(),
                });
            }
            SessionPhase::Paused => self.pause(),
            SessionPhase::Running => debug!("start ignored, session already running"),
        }
    }

    /// Toggles between running and paused. Does nothing while idle.
    pub fn pause(&mut self) {
        match self.phase {
            SessionPhase::Running => {
                self.countdown.stop();
                self.phase = SessionPhase::Paused;
                debug!(remaining = ?self.remaining(), "session paused");
                self.emit(SessionEvent::Paused {
                    remaining: self.remaining(),
                });
            }
            SessionPhase::Paused => {
                if self.exercise.is_timed() {
                    self.countdown.start();
                }
                self.phase = SessionPhase::Running;
                debug!(remaining = ?self.remaining(), "session resumed");
                self.emit(SessionEvent::Resumed {
                    remaining: self.remaining(),
                });
            }
            SessionPhase::Idle => debug!("pause ignored, session not started"),
        }
    }

    /// Moves to the next step without wrapping.
    pub fn next(&mut self) -> usize {
        self.go_to(self.step_index() as isize + 1)
    }

    /// Moves to the previous step without wrapping.
    pub fn previous(&mut self) -> usize {
        self.go_to(self.step_index() as isize - 1)
    }

    /// Moves to `target`, clamped to the step range.
    ///
    /// The countdown stops and is re-armed for the target step. A running
    /// timed session becomes paused; navigation never resumes it.
    pub fn go_to(&mut self, target: isize) -> usize {
        let step = self
            .sequencer
            .go_to(target, &self.exercise, &mut self.countdown);
        if self.phase == SessionPhase::Running && self.exercise.is_timed() {
            self.phase = SessionPhase::Paused;
        }
        debug!(target, step, "navigated");
        self.emit(SessionEvent::StepChanged {
            step,
            remaining: self.remaining(),
        });
        step
    }

    /// Loads a different exercise and resets to idle on its first step.
    pub fn switch_exercise(&mut self, exercise: Arc<Exercise>) {
        self.exercise = exercise;
        self.restart();
        info!(key = self.exercise.key(), "switched exercise");
        self.emit(SessionEvent::ExerciseSwitched {
            key: self.exercise.key().to_string(),
        });
    }

    /// Returns to idle on the first step of the current exercise.
    pub fn reset(&mut self) {
        self.restart();
        debug!("session reset");
        self.emit(SessionEvent::Reset);
    }

    /// Stores a response for the current step. Blank text clears it.
    pub fn record_response(&mut self, text: impl Into<String>) {
        let step = self.step_index();
        let text = text.into();
        if text.trim().is_empty() {
            self.responses.remove(&step);
        } else {
            self.responses.insert(step, text);
        }
        self.emit(SessionEvent::ResponseRecorded { step });
    }

    fn restart(&mut self) {
        self.sequencer.rewind(&self.exercise, &mut self.countdown);
        self.phase = SessionPhase::Idle;
        self.responses.clear();
        self.cycles_completed = 0;
    }

    /// Applies a single command. Returns false for [`SessionCommand::Quit`].
    pub fn apply(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Start => self.start(),
            SessionCommand::Pause => self.pause(),
            SessionCommand::Next => {
                self.next();
            }
            SessionCommand::Previous => {
                self.previous();
            }
            SessionCommand::GoTo(target) => {
                self.go_to(target);
            }
            SessionCommand::Reset => self.reset(),
            SessionCommand::Switch(exercise) => self.switch_exercise(exercise),
            SessionCommand::Respond(text) => self.record_response(text),
            SessionCommand::Quit => return false,
        }
        true
    }

    // ------------------------------------------------------------------------
    // Timer
    // ------------------------------------------------------------------------

    /// Waits for the next countdown firing and applies it.
    ///
    /// Never resolves while the countdown is stopped. Cancel safe.
    pub async fn advance(&mut self) {
        let signal = self.countdown.fired().await;
        self.handle_signal(signal);
    }

    fn handle_signal(&mut self, signal: CountdownSignal) {
        match signal {
            CountdownSignal::Tick { remaining } => {
                trace!(remaining, "tick");
                self.emit(SessionEvent::Tick { remaining });
            }
            CountdownSignal::Expired => {
                let from = self.sequencer.index();
                let keep_running = self.phase == SessionPhase::Running;
                let to = self
                    .sequencer
                    .on_expire(&self.exercise, &mut self.countdown, keep_running);
                debug!(from, to, "phase expired");
                self.emit(SessionEvent::PhaseExpired {
                    from,
                    to,
                    remaining: self.countdown.remaining(),
                });
                if to == 0 {
                    self.cycles_completed += 1;
                    self.emit(SessionEvent::CycleCompleted {
                        cycles: self.cycles_completed,
                    });
                }
            }
        }
    }

    /// Drives the session until `commands` closes or a `Quit` arrives.
    ///
    /// Commands take priority over a timer firing at the same instant.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<SessionCommand>) {
        loop {
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(command) => {
                        if !self.apply(command) {
                            break;
                        }
                    }
                    None => break,
                },
                signal = self.countdown.fired() => self.handle_signal(signal),
            }
        }
        self.countdown.stop();
        debug!("session loop finished");
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The active exercise.
    pub fn exercise(&self) -> &Arc<Exercise> {
        &self.exercise
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current step index.
    pub fn step_index(&self) -> usize {
        self.sequencer.index()
    }

    /// Seconds left in the current step, for timed exercises.
    pub fn remaining(&self) -> Option<u32> {
        self.exercise
            .is_timed()
            .then(|| self.countdown.remaining())
    }

    /// Returns true while the countdown timer is live.
    pub fn is_ticking(&self) -> bool {
        self.countdown.is_ticking()
    }

    /// Number of times the steps wrapped back to the start.
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Stored grounding responses keyed by step index.
    pub fn responses(&self) -> &BTreeMap<usize, String> {
        &self.responses
    }

    /// Point-in-time view for display.
    pub fn snapshot(&self) -> SessionSnapshot {
        let step = self.exercise.step(self.step_index());
        SessionSnapshot {
            exercise_key: self.exercise.key().to_string(),
            title: self.exercise.title().to_string(),
            category: self.exercise.category(),
            phase: self.phase,
            step_index: self.step_index(),
            step_count: self.exercise.step_count(),
            step_label: step.map(|s| s.label().to_string()).unwrap_or_default(),
            instruction: step.map(|s| s.instruction().to_string()).unwrap_or_default(),
            remaining_seconds: self.remaining(),
            cycles_completed: self.cycles_completed,
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("session event receiver dropped");
        }
    }
}
