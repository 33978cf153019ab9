//! Phase sequencer.
//!
//! Owns the current step index. Expiry advances it with wrap-around;
//! manual navigation clamps it and never wraps. Either way the countdown is
//! re-armed with the new step's duration.

use crate::exercise::Exercise;

use super::countdown::CountdownEngine;

/// Step index bookkeeping for one exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseSequencer {
    index: usize,
}

impl PhaseSequencer {
    /// Creates a sequencer positioned on the first step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Handles phase expiry: moves to `(index + 1) mod step_count`, re-arms
    /// the countdown and restarts it only when `keep_running` is set.
    ///
    /// Returns the new index.
    pub fn on_expire(
        &mut self,
        exercise: &Exercise,
        countdown: &mut CountdownEngine,
        keep_running: bool,
    ) -> usize {
        self.index = (self.index + 1) % exercise.step_count();
        Self::rearm(exercise, self.index, countdown);
        if keep_running && exercise.is_timed() {
            countdown.start();
        }
        self.index
    }

    /// Manual navigation: clamps `target` into `[0, step_count - 1]`, stops
    /// the countdown and re-arms it for the target step.
    ///
    /// Returns the new index.
    pub fn go_to(
        &mut self,
        target: isize,
        exercise: &Exercise,
        countdown: &mut CountdownEngine,
    ) -> usize {
        let last = exercise.step_count().saturating_sub(1);
        self.index = usize::try_from(target).map_or(0, |t| t.min(last));
        countdown.stop();
        Self::rearm(exercise, self.index, countdown);
        self.index
    }

    /// Moves back to the first step and re-arms the countdown for it.
    pub fn rewind(&mut self, exercise: &Exercise, countdown: &mut CountdownEngine) {
        self.index = 0;
        countdown.stop();
        Self::rearm(exercise, 0, countdown);
    }

    fn rearm(exercise: &Exercise, index: usize, countdown: &mut CountdownEngine) {
        if let Some(duration) = exercise.duration_of(index) {
            countdown.arm(duration);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::{breathing_478, grounding_54321};
    use tokio::time::Duration;

    fn countdown() -> CountdownEngine {
        CountdownEngine::new(Duration::from_millis(1000), Duration::from_millis(400))
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_expire_wraps() {
        let exercise = breathing_478().unwrap();
        let mut countdown = countdown();
        let mut sequencer = PhaseSequencer::new();

        assert_eq!(sequencer.on_expire(&exercise, &mut countdown, true), 1);
        assert_eq!(countdown.remaining(), 7);
        assert_eq!(sequencer.on_expire(&exercise, &mut countdown, true), 2);
        assert_eq!(countdown.remaining(), 8);
        assert_eq!(sequencer.on_expire(&exercise, &mut countdown, true), 0);
        assert_eq!(countdown.remaining(), 4);
        assert!(countdown.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_expire_without_running_stays_stopped() {
        let exercise = breathing_478().unwrap();
        let mut countdown = countdown();
        let mut sequencer = PhaseSequencer::new();

        sequencer.on_expire(&exercise, &mut countdown, false);
        assert!(!countdown.is_ticking());
        assert_eq!(countdown.remaining(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_to_clamps_and_never_wraps() {
        let exercise = breathing_478().unwrap();
        let mut countdown = countdown();
        let mut sequencer = PhaseSequencer::new();

        for target in 0..3 {
            assert_eq!(sequencer.go_to(target, &exercise, &mut countdown), target as usize);
        }
        assert_eq!(sequencer.go_to(-1, &exercise, &mut countdown), 0);
        assert_eq!(sequencer.go_to(3, &exercise, &mut countdown), 2);
        assert_eq!(sequencer.go_to(isize::MAX, &exercise, &mut countdown), 2);
        assert_eq!(countdown.remaining(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_to_stops_countdown() {
        let exercise = breathing_478().unwrap();
        let mut countdown = countdown();
        let mut sequencer = PhaseSequencer::new();
        countdown.arm(4);
        countdown.start();

        sequencer.go_to(1, &exercise, &mut countdown);
        assert!(!countdown.is_ticking());
        assert_eq!(countdown.remaining(), 7);
    }

    #[test]
    fn test_untimed_exercise_never_arms() {
        let exercise = grounding_54321().unwrap();
        let mut countdown = countdown();
        let mut sequencer = PhaseSequencer::new();

        assert_eq!(sequencer.go_to(4, &exercise, &mut countdown), 4);
        assert_eq!(sequencer.on_expire(&exercise, &mut countdown, true), 0);
        assert_eq!(countdown.remaining(), 0);
        assert!(!countdown.is_ticking());
    }

    #[test]
    fn test_rewind() {
        let exercise = breathing_478().unwrap();
        let mut countdown = countdown();
        let mut sequencer = PhaseSequencer::new();
        sequencer.go_to(2, &exercise, &mut countdown);

        sequencer.rewind(&exercise, &mut countdown);
        assert_eq!(sequencer.index(), 0);
        assert_eq!(countdown.remaining(), 4);
    }
}
