use std::fmt;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use quiz_core::model::{
    Cue, GameOutcome, GameSettings, Lifeline, LifelineSet, OPTION_COUNT, Question,
};

use super::advisory::{self, Advisory};
use super::events::{EventSink, GameEvent, Presentation};
use super::progress::{GameSnapshot, Phase};
use crate::error::{Rejection, SessionError};

//
// ─── SCHEDULED ACTIONS ─────────────────────────────────────────────────────────
//

/// Delayed step the engine is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// End of the suspense delay: reveal whether the answer was right.
    Reveal,
    /// End of the success display: next question or win.
    Advance,
    /// End of the failure display: loss.
    Conclude,
    /// Advisory overlay finished connecting.
    AdvisoryReady,
}

/// The single pending delayed action. `seq` changes every time a new action
/// is scheduled so drivers can tell a fresh schedule from one they already
/// armed a timer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub action: Scheduled,
    pub delay: Duration,
    pub seq: u64,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Live state of one play-through.
///
/// The engine is synchronous and owns no timers. Whoever drives it calls
/// [`tick`](Self::tick) once per second while [`is_ticking`](Self::is_ticking)
/// holds, and [`fire_pending`](Self::fire_pending) once the delay of
/// [`pending`](Self::pending) has elapsed.
pub struct ProgressionEngine<R, S> {
    questions: Vec<Question>,
    settings: GameSettings,
    current: usize,
    lifelines: LifelineSet,
    hidden: [bool; OPTION_COUNT],
    time_remaining: u32,
    selected: Option<usize>,
    phase: Phase,
    pending: Option<PendingAction>,
    next_seq: u64,
    rng: R,
    sink: S,
    presentation: Presentation,
}

impl<R: Rng, S: EventSink> ProgressionEngine<R, S> {
    /// Start a session on the given question sequence.
    ///
    /// Emits the first `QuestionChanged` and `TimerUpdated` events and blows the
    /// opening whistle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn start(
        questions: Vec<Question>,
        settings: GameSettings,
        rng: R,
        sink: S,
        presentation: Presentation,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut engine = Self {
            questions,
            settings,
            current: 0,
            lifelines: LifelineSet::all_available(),
            hidden: [false; OPTION_COUNT],
            time_remaining: settings.max_time_secs(),
            selected: None,
            phase: Phase::Ready,
            pending: None,
            next_seq: 0,
            rng,
            sink,
            presentation,
        };

        info!(questions = engine.questions.len(), "session started");
        engine.presentation.play(Cue::Whistle);
        engine.announce_question();
        Ok(engine)
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn lifelines(&self) -> LifelineSet {
        self.lifelines
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Option indices currently hidden by an elimination, ascending.
    #[must_use]
    pub fn hidden_options(&self) -> Vec<usize> {
        (0..OPTION_COUNT).filter(|&i| self.hidden[i]).collect()
    }

    #[must_use]
    pub fn is_option_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    /// True while the countdown should advance.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.phase == Phase::Ready && self.time_remaining > 0
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_index: self.current,
            total_questions: self.questions.len(),
            time_remaining: self.time_remaining,
            lifelines: self.lifelines,
            hidden_options: self.hidden_options(),
            selected_answer: self.selected,
            phase: self.phase,
        }
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    //
    // ─── INPUTS ────────────────────────────────────────────────────────────────
    //

    /// Lock in an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns a `Rejection` and leaves state untouched when the engine is not
    /// ready, an answer is already in, time is up, or the option is hidden or
    /// does not exist.
    pub fn submit_answer(&mut self, index: usize) -> Result<(), Rejection> {
        self.ensure_ready()?;
        if self.selected.is_some() {
            return Err(Rejection::AlreadyAnswered);
        }
        if index >= OPTION_COUNT {
            return Err(Rejection::OptionOutOfRange(index));
        }
        if self.is_option_hidden(index) {
            return Err(Rejection::OptionHidden(index));
        }

        self.lock_in(index);
        Ok(())
    }

    /// Invoke a lifeline.
    ///
    /// # Errors
    ///
    /// Returns a `Rejection` and leaves state untouched when the lifeline was
    /// already used, the engine is not ready, or time is up.
    pub fn use_lifeline(&mut self, lifeline: Lifeline) -> Result<(), Rejection> {
        if self.is_finished() {
            return Err(Rejection::Finished);
        }
        if !self.lifelines.is_available(lifeline) {
            return Err(Rejection::LifelineUsed(lifeline));
        }
        self.ensure_ready()?;

        self.lifelines.consume(lifeline);
        debug!(lifeline = lifeline.as_str(), index = self.current, "lifeline consumed");

        match lifeline {
            Lifeline::AudiencePoll => {
                let poll = advisory::audience_poll(&self.questions[self.current], &mut self.rng);
                self.open_overlay(lifeline, Advisory::Audience(poll));
            }
            Lifeline::ExpertAdvice => {
                let advice = advisory::expert_advice(&self.questions[self.current], &mut self.rng);
                self.open_overlay(lifeline, Advisory::Expert(advice));
            }
            Lifeline::AutoAnswer => {
                self.presentation.play(Cue::Cash);
                self.sink.emit(GameEvent::LifelineConsumed {
                    lifeline,
                    advisory: None,
                });
                let correct = self.questions[self.current].correct_index();
                self.lock_in(correct);
            }
            Lifeline::OptionElimination => {
                let hidden =
                    advisory::eliminate_options(&self.questions[self.current], &mut self.rng);
                for index in hidden {
                    self.hidden[index] = true;
                }
                self.presentation.play(Cue::Substitute);
                self.sink.emit(GameEvent::LifelineConsumed {
                    lifeline,
                    advisory: Some(Advisory::Eliminated { hidden }),
                });
            }
        }
        Ok(())
    }

    /// Dismiss an open audience/expert overlay and resume the countdown.
    ///
    /// # Errors
    ///
    /// Returns `Rejection::NoOverlay` when none is open, or
    /// `Rejection::OverlayConnecting` while it is still connecting.
    pub fn close_advisory_overlay(&mut self) -> Result<(), Rejection> {
        match self.phase {
            Phase::Advisory { ready: true, .. } => {
                debug!(index = self.current, "advisory overlay closed");
                self.phase = Phase::Ready;
                Ok(())
            }
            Phase::Advisory { ready: false, .. } => Err(Rejection::OverlayConnecting),
            Phase::Finished(_) => Err(Rejection::Finished),
            _ => Err(Rejection::NoOverlay),
        }
    }

    /// Advance the countdown by one second. Reaching zero ends the session.
    ///
    /// # Errors
    ///
    /// Returns `Rejection::ClockFrozen` outside the ready phase.
    pub fn tick(&mut self) -> Result<(), Rejection> {
        if self.is_finished() {
            return Err(Rejection::Finished);
        }
        if !self.is_ticking() {
            return Err(Rejection::ClockFrozen);
        }

        self.time_remaining -= 1;
        self.sink.emit(GameEvent::TimerUpdated {
            seconds_remaining: self.time_remaining,
        });

        if self.time_remaining == 0 {
            debug!(index = self.current, "countdown expired");
            self.presentation.play(Cue::Wrong);
            self.finish(GameOutcome::loss(self.current));
        }
        Ok(())
    }

    /// Run the pending delayed action, if any, and return which one ran.
    pub fn fire_pending(&mut self) -> Option<Scheduled> {
        let pending = self.pending.take()?;
        match pending.action {
            Scheduled::Reveal => self.reveal(),
            Scheduled::Advance => self.advance(),
            Scheduled::Conclude => self.finish(GameOutcome::loss(self.current)),
            Scheduled::AdvisoryReady => {
                if let Phase::Advisory { lifeline, ready } = &mut self.phase {
                    *ready = true;
                    let lifeline = *lifeline;
                    self.sink.emit(GameEvent::AdvisoryReady { lifeline });
                }
            }
        }
        Some(pending.action)
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    fn ensure_ready(&self) -> Result<(), Rejection> {
        match self.phase {
            Phase::Finished(_) => Err(Rejection::Finished),
            Phase::Ready if self.time_remaining == 0 => Err(Rejection::TimeUp),
            Phase::Ready => Ok(()),
            _ => Err(Rejection::Busy),
        }
    }

    fn lock_in(&mut self, index: usize) {
        debug!(index = self.current, answer = index, "answer locked in");
        self.selected = Some(index);
        self.phase = Phase::Checking;
        self.schedule(Scheduled::Reveal, self.settings.suspense());
    }

    fn open_overlay(&mut self, lifeline: Lifeline, advisory: Advisory) {
        self.presentation.play(Cue::Thinking);
        self.phase = Phase::Advisory {
            lifeline,
            ready: false,
        };
        self.sink.emit(GameEvent::LifelineConsumed {
            lifeline,
            advisory: Some(advisory),
        });
        self.schedule(Scheduled::AdvisoryReady, self.settings.advisory_connect());
    }

    fn reveal(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let correct = self.questions[self.current].is_correct(selected);
        debug!(index = self.current, correct, "answer revealed");
        self.sink.emit(GameEvent::AnswerOutcome { correct });

        if correct {
            self.presentation.play(Cue::Correct);
            self.presentation.celebrate();
            self.phase = Phase::Advancing;
            self.schedule(Scheduled::Advance, self.settings.success_display());
        } else {
            self.presentation.play(Cue::Wrong);
            self.phase = Phase::Failing;
            self.schedule(Scheduled::Conclude, self.settings.failure_display());
        }
    }

    fn advance(&mut self) {
        if self.current + 1 >= self.questions.len() {
            self.finish(GameOutcome::win(self.questions.len()));
            return;
        }

        self.current += 1;
        self.selected = None;
        self.hidden = [false; OPTION_COUNT];
        self.time_remaining = self.settings.max_time_secs();
        self.phase = Phase::Ready;
        self.announce_question();
    }

    fn announce_question(&mut self) {
        self.sink.emit(GameEvent::QuestionChanged {
            index: self.current,
            question: self.questions[self.current].clone(),
        });
        self.sink.emit(GameEvent::TimerUpdated {
            seconds_remaining: self.time_remaining,
        });
    }

    fn schedule(&mut self, action: Scheduled, delay: Duration) {
        self.next_seq += 1;
        self.pending = Some(PendingAction {
            action,
            delay,
            seq: self.next_seq,
        });
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.pending = None;
        self.phase = Phase::Finished(outcome);
        info!(won = outcome.won, level = outcome.level_reached, "session ended");
        self.presentation.play(if outcome.won {
            Cue::VictoryMelody
        } else {
            Cue::LossMelody
        });
        self.sink.emit(GameEvent::SessionEnded(outcome));
    }
}

impl<R, S> fmt::Debug for ProgressionEngine<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressionEngine")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("time_remaining", &self.time_remaining)
            .field("selected", &self.selected)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
