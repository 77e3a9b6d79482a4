use std::time::Duration;

use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use quiz_core::model::{Cue, GameOutcome, GameSettings, Lifeline, Question};

use super::events::{GameEvent, Presentation};
use super::progress::GameSnapshot;
use super::service::ProgressionEngine;
use crate::error::SessionError;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
enum Command {
    Submit(usize),
    UseLifeline(Lifeline),
    CloseOverlay,
}

/// Starts sessions and drives them on the tokio clock.
#[derive(Debug, Clone, Default)]
pub struct GameLoopService {
    settings: GameSettings,
    presentation: Presentation,
}

impl GameLoopService {
    #[must_use]
    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    /// Replace the per-question countdown, keeping the other delays.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Settings` if `secs` is outside 1..=600.
    pub fn with_max_time_secs(mut self, secs: u32) -> Result<Self, SessionError> {
        self.settings = self.settings.with_max_time_secs(secs)?;
        Ok(self)
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Play the opening melody. Meant for the start screen, before
    /// [`start_session`](Self::start_session).
    pub fn play_intro(&self) {
        self.presentation.play(Cue::IntroMelody);
    }

    /// Start a session and spawn the task that runs its clocks.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn start_session<R>(
        &self,
        questions: Vec<Question>,
        rng: R,
    ) -> Result<EngineHandle, SessionError>
    where
        R: Rng + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let engine = ProgressionEngine::start(
            questions,
            self.settings,
            rng,
            event_tx,
            self.presentation.clone(),
        )?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let task = tokio::spawn(run(engine, command_rx, snapshot_tx));

        Ok(EngineHandle {
            commands: command_tx,
            events: event_rx,
            snapshots: snapshot_rx,
            task,
        })
    }
}

/// Caller's side of a running session.
///
/// Dropping the handle aborts the session task, cancelling any countdown or
/// delay still pending.
#[derive(Debug)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<Command>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Returns false once the session task is gone.
    pub fn submit_answer(&self, index: usize) -> bool {
        self.send(Command::Submit(index))
    }

    /// Returns false once the session task is gone.
    pub fn use_lifeline(&self, lifeline: Lifeline) -> bool {
        self.send(Command::UseLifeline(lifeline))
    }

    /// Returns false once the session task is gone.
    pub fn close_advisory_overlay(&self) -> bool {
        self.send(Command::CloseOverlay)
    }

    /// Next engine event; `None` after the session ended and all events were
    /// drained.
    pub async fn next_event(&mut self) -> Option<GameEvent> {
        self.events.recv().await
    }

    /// Most recently published state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Wait for the session to end.
    ///
    /// Returns `None` if the task stopped without an outcome.
    pub async fn outcome(&mut self) -> Option<GameOutcome> {
        let snapshot = self
            .snapshots
            .wait_for(|snapshot| snapshot.outcome().is_some())
            .await
            .ok()?;
        snapshot.outcome()
    }

    fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Deadlines for the countdown and the pending delay.
#[derive(Debug, Default)]
struct Deadlines {
    tick: Option<Instant>,
    pending: Option<(u64, Instant)>,
}

impl Deadlines {
    /// Re-arm against the engine's state. A countdown resuming after a freeze
    /// always waits a full second before its next tick.
    fn sync<R: Rng>(
        &mut self,
        engine: &ProgressionEngine<R, mpsc::UnboundedSender<GameEvent>>,
        now: Instant,
    ) {
        if engine.is_ticking() {
            self.tick.get_or_insert(now + TICK);
        } else {
            self.tick = None;
        }

        self.pending = match (engine.pending(), self.pending) {
            (Some(p), Some((seq, at))) if p.seq == seq => Some((seq, at)),
            (Some(p), _) => Some((p.seq, now + p.delay)),
            (None, _) => None,
        };
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn run<R: Rng>(
    mut engine: ProgressionEngine<R, mpsc::UnboundedSender<GameEvent>>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<GameSnapshot>,
) {
    let mut deadlines = Deadlines::default();

    while !engine.is_finished() {
        deadlines.sync(&engine, Instant::now());
        let tick_at = deadlines.tick;
        let pending_at = deadlines.pending.map(|(_, at)| at);

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("engine handle dropped, abandoning session");
                    return;
                };
                let result = match command {
                    Command::Submit(index) => engine.submit_answer(index),
                    Command::UseLifeline(lifeline) => engine.use_lifeline(lifeline),
                    Command::CloseOverlay => engine.close_advisory_overlay(),
                };
                if let Err(rejection) = result {
                    debug!(?command, %rejection, "input ignored");
                }
            }
            () = sleep_until_opt(tick_at) => {
                deadlines.tick = tick_at.map(|at| at + TICK);
                if let Err(rejection) = engine.tick() {
                    debug!(%rejection, "tick ignored");
                }
            }
            () = sleep_until_opt(pending_at) => {
                deadlines.pending = None;
                engine.fire_pending();
            }
        }

        snapshots.send_replace(engine.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionId, SettingsError};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_questions(count: u64) -> Vec<Question> {
        (0..count)
            .map(|i| {
                let options = vec!["A".into(), "B".into(), "C".into(), "D".into()];
                Question::new(QuestionId::new(i), format!("Q{i}"), options, 1, "1").unwrap()
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn empty_session_is_rejected() {
        let service = GameLoopService::default();
        let err = service
            .start_session(Vec::new(), StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn countdown_override_is_validated() {
        let err = GameLoopService::default()
            .with_max_time_secs(0)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Settings(SettingsError::InvalidMaxTime)
        ));

        let service = GameLoopService::default().with_max_time_secs(45).unwrap();
        assert_eq!(service.settings().max_time_secs(), 45);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_override_applies_to_new_sessions() {
        let service = GameLoopService::default().with_max_time_secs(5).unwrap();
        let mut handle = service
            .start_session(build_questions(12), StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(handle.snapshot().time_remaining, 5);

        let started = Instant::now();
        assert_eq!(handle.outcome().await, Some(GameOutcome::loss(0)));
        assert!(started.elapsed() < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_runs_on_tokio_clock() {
        let service = GameLoopService::default();
        let mut handle = service
            .start_session(build_questions(12), StdRng::seed_from_u64(1))
            .unwrap();

        let started = Instant::now();
        assert_eq!(handle.outcome().await, Some(GameOutcome::loss(0)));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(30) && elapsed < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_the_task() {
        let service = GameLoopService::default();
        let handle = service
            .start_session(build_questions(12), StdRng::seed_from_u64(1))
            .unwrap();
        let mut snapshots = handle.subscribe();
        drop(handle);

        // The sender side lives in the task; once aborted, `changed` errors out.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(snapshots.changed().await.is_err());
        assert_eq!(snapshots.borrow().time_remaining, 30);
    }
}
