use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use quiz_core::model::{Level, Question, QuestionPool};

use crate::error::SessionError;

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// Levels left out because the pool had no candidates for them.
    pub skipped_levels: Vec<Level>,
}

impl SessionPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns true when every level contributed a question.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_levels.is_empty()
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

/// Builds the fixed question sequence for one play-through.
pub struct SessionBuilder<'a> {
    pool: &'a QuestionPool,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(pool: &'a QuestionPool) -> Self {
        Self { pool }
    }

    /// Pick one question per level, uniformly from that level's candidates.
    ///
    /// Levels without candidates are skipped and listed in
    /// `SessionPlan::skipped_levels`; the remaining questions keep ladder order.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> SessionPlan {
        let mut questions = Vec::new();
        let mut skipped_levels = Vec::new();

        for level in Level::all() {
            match self.pool.candidates(level).choose(rng) {
                Some(question) => questions.push(question.clone()),
                None => {
                    debug!(%level, "no candidates for level, skipping");
                    skipped_levels.push(level);
                }
            }
        }

        SessionPlan {
            questions,
            skipped_levels,
        }
    }

    /// Like [`SessionBuilder::build`], but refuses an incomplete pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingLevel` for the first level with no
    /// candidates.
    pub fn build_strict<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SessionPlan, SessionError> {
        if let Some(level) = self.pool.missing_levels().into_iter().next() {
            return Err(SessionError::MissingLevel { level });
        }
        Ok(self.build(rng))
    }
}
