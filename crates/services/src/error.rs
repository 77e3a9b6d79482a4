//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{Level, Lifeline, SettingsError};

/// Errors emitted while building or starting a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("no candidate questions for level {level}")]
    MissingLevel { level: Level },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Why the engine ignored an input.
///
/// Rejections never change game state. They are an ordinary race between the
/// presentation layer and the engine, so callers may drop them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Rejection {
    #[error("session already finished")]
    Finished,
    #[error("engine is busy resolving the current question")]
    Busy,
    #[error("an answer was already submitted for this question")]
    AlreadyAnswered,
    #[error("time is up")]
    TimeUp,
    #[error("option {0} does not exist")]
    OptionOutOfRange(usize),
    #[error("option {0} is hidden")]
    OptionHidden(usize),
    #[error("lifeline {} already used", .0.as_str())]
    LifelineUsed(Lifeline),
    #[error("no advisory overlay is open")]
    NoOverlay,
    #[error("advisory overlay is still connecting")]
    OverlayConnecting,
    #[error("countdown is frozen")]
    ClockFrozen,
}
