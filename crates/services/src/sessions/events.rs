use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use quiz_core::model::{Cue, GameOutcome, Lifeline, Question};

use super::advisory::Advisory;

/// Notifications emitted by the progression engine, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    QuestionChanged { index: usize, question: Question },
    TimerUpdated { seconds_remaining: u32 },
    LifelineConsumed {
        lifeline: Lifeline,
        advisory: Option<Advisory>,
    },
    /// The advisory overlay finished connecting and may now be closed.
    AdvisoryReady { lifeline: Lifeline },
    AnswerOutcome { correct: bool },
    SessionEnded(GameOutcome),
}

/// Receives engine events. Implementations must not block.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl EventSink for UnboundedSender<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        // A closed receiver means nobody is listening anymore.
        let _ = self.send(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Fire-and-forget audio capability.
pub trait AudioCues {
    fn play(&self, cue: Cue);
}

/// Cosmetic celebration shown on a correct answer.
pub trait Celebration {
    fn celebrate(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioCues for Silent {
    fn play(&self, cue: Cue) {
        trace!(%cue, "cue dropped");
    }
}

impl Celebration for Silent {
    fn celebrate(&self) {}
}

/// Presentation capabilities the engine fires at without waiting.
#[derive(Clone)]
pub struct Presentation {
    cues: Arc<dyn AudioCues + Send + Sync>,
    celebration: Arc<dyn Celebration + Send + Sync>,
}

impl Presentation {
    #[must_use]
    pub fn new(
        cues: Arc<dyn AudioCues + Send + Sync>,
        celebration: Arc<dyn Celebration + Send + Sync>,
    ) -> Self {
        Self { cues, celebration }
    }

    #[must_use]
    pub fn silent() -> Self {
        Self::new(Arc::new(Silent), Arc::new(Silent))
    }

    pub(crate) fn play(&self, cue: Cue) {
        self.cues.play(cue);
    }

    pub(crate) fn celebrate(&self) {
        self.celebration.celebrate();
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presentation").finish_non_exhaustive()
    }
}
