use serde::Serialize;

use quiz_core::model::{GameOutcome, Lifeline, LifelineSet};

/// Where the current question stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Countdown running, answers and lifelines accepted.
    Ready,
    /// Answer locked in, waiting out the suspense delay.
    Checking,
    /// Correct answer shown, about to move on.
    Advancing,
    /// Wrong answer shown, about to end the session.
    Failing,
    /// Audience or expert overlay open; countdown frozen.
    Advisory { lifeline: Lifeline, ready: bool },
    Finished(GameOutcome),
}

impl Phase {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished(_))
    }
}

/// Aggregated view of session state, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub current_index: usize,
    pub total_questions: usize,
    pub time_remaining: u32,
    pub lifelines: LifelineSet,
    pub hidden_options: Vec<usize>,
    pub selected_answer: Option<usize>,
    pub phase: Phase,
}

impl GameSnapshot {
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}
