//! Exercise session module.
//!
//! This module contains the guided-exercise core:
//! - `countdown`: per-step countdown with a single owned timer
//! - `sequencer`: step index advance (wrapping) and navigation (clamping)
//! - `controller`: session state machine, events and the async driver loop

pub mod controller;
pub mod countdown;
pub mod sequencer;

pub use controller::{Session, SessionCommand, SessionEvent};
pub use countdown::{CountdownEngine, CountdownSignal};
pub use sequencer::PhaseSequencer;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;
    use tokio::time::{Duration, Instant};

    use super::*;
    use crate::catalog::defaults::{breathing_478, grounding_54321};
    use crate::config::TimingConfig;
    use crate::types::SessionPhase;

    fn create_session() -> (Session, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let exercise = Arc::new(breathing_478().unwrap());
        (Session::new(exercise, &TimingConfig::default(), tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    mod state_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_new_session_is_idle() {
            let (session, _rx) = create_session();

            assert_eq!(session.phase(), SessionPhase::Idle);
            assert_eq!(session.step_index(), 0);
            assert_eq!(session.remaining(), Some(4));
            assert!(!session.is_ticking());
        }

        #[tokio::test(start_paused = true)]
        async fn test_start() {
            let (mut session, mut rx) = create_session();

            session.start();

            assert_eq!(session.phase(), SessionPhase::Running);
            assert!(session.is_ticking());
            assert_eq!(
                rx.try_recv().unwrap(),
                SessionEvent::Started {
                    step: 0,
                    remaining: Some(4)
                }
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_start_twice_is_noop() {
            let (mut session, mut rx) = create_session();

            session.start();
            session.start();

            assert_eq!(drain(&mut rx).len(), 1);
            assert!(session.is_ticking());
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_toggle_preserves_remaining() {
            let (mut session, mut rx) = create_session();
            session.start();
            session.advance().await;
            assert_eq!(session.remaining(), Some(3));

            session.pause();
            assert_eq!(session.phase(), SessionPhase::Paused);
            assert!(!session.is_ticking());
            assert_eq!(session.remaining(), Some(3));

            session.pause();
            assert_eq!(session.phase(), SessionPhase::Running);
            assert!(session.is_ticking());
            assert_eq!(session.remaining(), Some(3));

            let events = drain(&mut rx);
            assert!(events.contains(&SessionEvent::Paused { remaining: Some(3) }));
            assert!(events.contains(&SessionEvent::Resumed { remaining: Some(3) }));
        }

        #[tokio::test(start_paused = true)]
        async fn test_start_from_paused_resumes() {
            let (mut session, _rx) = create_session();
            session.start();
            session.pause();

            session.start();

            assert_eq!(session.phase(), SessionPhase::Running);
            assert!(session.is_ticking());
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_while_idle_is_noop() {
            let (mut session, mut rx) = create_session();

            session.pause();

            assert_eq!(session.phase(), SessionPhase::Idle);
            assert!(drain(&mut rx).is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn test_navigation_stops_and_does_not_resume() {
            let (mut session, _rx) = create_session();
            session.start();

            assert_eq!(session.next(), 1);

            assert_eq!(session.phase(), SessionPhase::Paused);
            assert!(!session.is_ticking());
            assert_eq!(session.remaining(), Some(7));
        }

        #[tokio::test(start_paused = true)]
        async fn test_navigation_while_idle_stays_idle() {
            let (mut session, _rx) = create_session();

            session.go_to(2);

            assert_eq!(session.phase(), SessionPhase::Idle);
            assert_eq!(session.remaining(), Some(8));

            session.start();
            assert_eq!(session.step_index(), 2);
            assert_eq!(session.remaining(), Some(8));
        }

        #[tokio::test(start_paused = true)]
        async fn test_go_to_clamps() {
            let (mut session, _rx) = create_session();

            assert_eq!(session.go_to(-1), 0);
            assert_eq!(session.go_to(3), 2);
            assert_eq!(session.go_to(1), 1);
            assert_eq!(session.previous(), 0);
            assert_eq!(session.previous(), 0);
            assert_eq!(session.go_to(2), 2);
            assert_eq!(session.next(), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_switch_exercise_resets_from_any_state() {
            let (mut session, mut rx) = create_session();
            session.start();
            session.go_to(2);
            session.pause();
            assert_eq!(session.phase(), SessionPhase::Running);

            let grounding = Arc::new(grounding_54321().unwrap());
            session.switch_exercise(grounding);

            assert_eq!(session.phase(), SessionPhase::Idle);
            assert_eq!(session.step_index(), 0);
            assert_eq!(session.remaining(), None);
            assert!(!session.is_ticking());
            assert!(drain(&mut rx).contains(&SessionEvent::ExerciseSwitched {
                key: "grounding-54321".to_string()
            }));

            let breathing = Arc::new(breathing_478().unwrap());
            session.switch_exercise(breathing);
            assert_eq!(session.remaining(), Some(4));
            assert_eq!(session.phase(), SessionPhase::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn test_reset() {
            let (mut session, _rx) = create_session();
            session.start();
            session.go_to(2);

            session.reset();

            assert_eq!(session.phase(), SessionPhase::Idle);
            assert_eq!(session.step_index(), 0);
            assert_eq!(session.remaining(), Some(4));
            assert_eq!(session.cycles_completed(), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_snapshot() {
            let (mut session, _rx) = create_session();
            session.go_to(1);

            let snapshot = session.snapshot();
            assert_eq!(snapshot.exercise_key, "breathing-478");
            assert_eq!(snapshot.step_label, "Hold");
            assert_eq!(snapshot.step_count, 3);
            assert_eq!(snapshot.remaining_seconds, Some(7));
            assert_eq!(snapshot.phase, SessionPhase::Idle);
        }
    }

    mod timing_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_478_scenario() {
            let (mut session, mut rx) = create_session();
            session.start();
            let began = Instant::now();

            for _ in 0..4 {
                session.advance().await;
            }
            assert_eq!(session.remaining(), Some(0));
            assert_eq!(session.step_index(), 0);

            session.advance().await;
            assert_eq!(began.elapsed(), Duration::from_millis(4400));
            assert_eq!(session.step_index(), 1);
            assert_eq!(session.remaining(), Some(7));

            for _ in 0..8 {
                session.advance().await;
            }
            assert_eq!(session.step_index(), 2);
            assert_eq!(session.remaining(), Some(8));

            for _ in 0..9 {
                session.advance().await;
            }
            assert_eq!(session.step_index(), 0);
            assert_eq!(session.remaining(), Some(4));
            assert_eq!(session.cycles_completed(), 1);
            assert_eq!(began.elapsed(), Duration::from_millis(19_000 + 3 * 400));

            let expirations: Vec<_> = drain(&mut rx)
                .into_iter()
                .filter(|e| matches!(e, SessionEvent::PhaseExpired { .. }))
                .collect();
            assert_eq!(
                expirations,
                vec![
                    SessionEvent::PhaseExpired {
                        from: 0,
                        to: 1,
                        remaining: 7
                    },
                    SessionEvent::PhaseExpired {
                        from: 1,
                        to: 2,
                        remaining: 8
                    },
                    SessionEvent::PhaseExpired {
                        from: 2,
                        to: 0,
                        remaining: 4
                    },
                ]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_previous_from_hold_scenario() {
            let (mut session, _rx) = create_session();
            session.start();
            for _ in 0..5 {
                session.advance().await;
            }
            for _ in 0..4 {
                session.advance().await;
            }
            assert_eq!(session.step_index(), 1);
            assert_eq!(session.remaining(), Some(3));

            session.previous();

            assert_eq!(session.step_index(), 0);
            assert_eq!(session.remaining(), Some(4));
            assert!(!session.is_ticking());
            assert_ne!(session.phase(), SessionPhase::Running);
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_during_settle_then_resume_advances() {
            let (mut session, _rx) = create_session();
            session.start();
            for _ in 0..4 {
                session.advance().await;
            }
            assert_eq!(session.remaining(), Some(0));

            session.pause();
            session.pause();
            let began = Instant::now();
            session.advance().await;

            assert_eq!(began.elapsed(), Duration::from_millis(400));
            assert_eq!(session.step_index(), 1);
            assert!(session.is_ticking());
        }
    }

    mod grounding_tests {
        use super::*;

        fn create_grounding() -> (Session, mpsc::UnboundedReceiver<SessionEvent>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let exercise = Arc::new(grounding_54321().unwrap());
            (Session::new(exercise, &TimingConfig::default(), tx), rx)
        }

        #[tokio::test(start_paused = true)]
        async fn test_grounding_never_ticks() {
            let (mut session, _rx) = create_grounding();
            session.start();

            assert_eq!(session.phase(), SessionPhase::Running);
            assert!(!session.is_ticking());
            assert_eq!(session.remaining(), None);

            let result = tokio::time::timeout(Duration::from_secs(30), session.advance()).await;
            assert!(result.is_err());
        }

        #[tokio::test(start_paused = true)]
        async fn test_grounding_navigation_keeps_running() {
            let (mut session, _rx) = create_grounding();
            session.start();

            assert_eq!(session.next(), 1);
            assert_eq!(session.phase(), SessionPhase::Running);
            assert_eq!(session.go_to(10), 4);
        }

        #[tokio::test(start_paused = true)]
        async fn test_record_responses() {
            let (mut session, mut rx) = create_grounding();
            session.start();

            session.record_response("a lamp, a cup");
            session.next();
            session.record_response("the desk");
            session.record_response("   ");

            assert_eq!(session.responses().len(), 1);
            assert_eq!(session.responses()[&0], "a lamp, a cup");
            assert!(drain(&mut rx).contains(&SessionEvent::ResponseRecorded { step: 1 }));

            session.reset();
            assert!(session.responses().is_empty());
        }
    }

    mod run_loop_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_run_processes_commands_and_quits() {
            let (mut session, mut events) = create_session();
            let (tx, rx) = mpsc::unbounded_channel();

            tx.send(SessionCommand::Start).unwrap();
            tx.send(SessionCommand::Next).unwrap();
            tx.send(SessionCommand::Quit).unwrap();
            session.run(rx).await;

            assert_eq!(session.step_index(), 1);
            assert_eq!(session.phase(), SessionPhase::Paused);
            assert!(!session.is_ticking());
            assert_eq!(drain(&mut events).len(), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_free_runs_full_cycle() {
            let (mut session, mut events) = create_session();
            let (tx, rx) = mpsc::unbounded_channel();
            tx.send(SessionCommand::Start).unwrap();

            let quit_at = Duration::from_millis(19_000 + 3 * 400 + 100);
            let quitter = async {
                tokio::time::sleep(quit_at).await;
                tx.send(SessionCommand::Quit).unwrap();
            };
            tokio::join!(session.run(rx), quitter);

            let expired = drain(&mut events)
                .into_iter()
                .filter(|e| matches!(e, SessionEvent::PhaseExpired { .. }))
                .count();
            assert_eq!(expired, 3);
            assert_eq!(session.step_index(), 0);
            assert_eq!(session.cycles_completed(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_ends_when_commands_close() {
            let (mut session, _events) = create_session();
            let (tx, rx) = mpsc::unbounded_channel::<SessionCommand>();
            drop(tx);

            session.run(rx).await;
            assert_eq!(session.phase(), SessionPhase::Idle);
        }
    }
}
