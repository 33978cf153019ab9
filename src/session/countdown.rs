//! Countdown engine.
//!
//! Holds the "seconds remaining" counter for the current step and the one
//! timer that drives it. The timer is a private `Sleep`; there is never more
//! than one, and dropping it is how it gets cancelled, so `arm`, `stop` and
//! dropping the engine all cancel any pending firing.
//!
//! The engine does not spawn anything. Its owner awaits [`CountdownEngine::fired`],
//! which resolves once per tick while running. When the counter reaches
//! zero the engine waits the settle delay, reports [`CountdownSignal::Expired`]
//! once and stops itself.

use std::future;
use std::pin::Pin;

use tokio::time::{sleep, Duration, Sleep};

/// What the countdown reports each time its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownSignal {
    /// One tick elapsed
    Tick {
        /// Seconds left after this tick
        remaining: u32,
    },
    /// The settle delay after reaching zero has elapsed
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Tick,
    Settle,
}

#[derive(Debug)]
struct LiveTimer {
    sleep: Pin<Box<Sleep>>,
    pending: Pending,
}

/// Per-step countdown with a single owned timer.
#[derive(Debug)]
pub struct CountdownEngine {
    remaining: u32,
    timer: Option<LiveTimer>,
    tick_interval: Duration,
    settle_delay: Duration,
}

impl CountdownEngine {
    /// Creates an unarmed engine.
    pub fn new(tick_interval: Duration, settle_delay: Duration) -> Self {
        Self {
            remaining: 0,
            timer: None,
            tick_interval,
            settle_delay,
        }
    }

    /// Cancels any live timer and loads `duration` seconds.
    pub fn arm(&mut self, duration: u32) {
        debug_assert!(duration >= 1, "countdown armed with zero duration");
        self.timer = None;
        self.remaining = duration;
    }

    /// Starts ticking from the current remaining value.
    ///
    /// Returns false without doing anything if a timer is already live.
    /// Starting at zero remaining (stopped during the settle delay) goes
    /// straight to the settle wait.
    pub fn start(&mut self) -> bool {
        if self.timer.is_some() {
            return false;
        }
        let (pending, delay) = if self.remaining == 0 {
            (Pending::Settle, self.settle_delay)
        } else {
            (Pending::Tick, self.tick_interval)
        };
        self.timer = Some(LiveTimer {
            sleep: Box::pin(sleep(delay)),
            pending,
        });
        true
    }

    /// Cancels the live timer, keeping the remaining value.
    ///
    /// Returns true if a timer was cancelled.
    pub fn stop(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Seconds left in the current step.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns true while a timer is live.
    pub fn is_ticking(&self) -> bool {
        self.timer.is_some()
    }

    /// Waits for the live timer to fire and applies its effect.
    ///
    /// Never resolves while no timer is live. Cancel safe: dropping the
    /// future before the timer fires changes nothing.
    pub async fn fired(&mut self) -> CountdownSignal {
        let Some(timer) = self.timer.as_mut() else {
            return future::pending().await;
        };

        timer.sleep.as_mut().await;
        let deadline = timer.sleep.deadline();
        let pending = timer.pending;

        match pending {
            Pending::Tick => {
                self.remaining = self.remaining.saturating_sub(1);
                if self.remaining == 0 {
                    timer.pending = Pending::Settle;
                    timer.sleep.as_mut().reset(deadline + self.settle_delay);
                } else {
                    timer.sleep.as_mut().reset(deadline + self.tick_interval);
                }
                CountdownSignal::Tick {
                    remaining: self.remaining,
                }
            }
            Pending::Settle => {
                self.timer = None;
                CountdownSignal::Expired
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
