use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("expected 4 options, got {0}")]
    OptionCount(usize),

    #[error("option {0} cannot be empty")]
    EmptyOption(usize),

    #[error("correct index {0} is out of range")]
    CorrectIndexOutOfRange(usize),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One trivia item with four options and a single correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    prize: String,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, the option
    /// count is not four, or `correct_index` does not point at an option.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        prize: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if let Some(blank) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption(blank));
        }
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|rest: Vec<String>| QuestionError::OptionCount(rest.len()))?;
        if correct_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange(correct_index));
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
            prize: prize.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Prize attached to clearing this question's level.
    #[must_use]
    pub fn prize(&self) -> &str {
        &self.prize
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    /// Indices of the three wrong options, in ascending order.
    pub fn wrong_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..OPTION_COUNT).filter(move |&i| i != self.correct_index)
    }
}

/// Serialized shape of a question, validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub prize: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(
            record.id,
            record.prompt,
            record.options,
            record.correct_index,
            record.prize,
        )
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            prompt: question.prompt,
            options: question.options.into(),
            correct_index: question.correct_index,
            prize: question.prize,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
