use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Question
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Number of levels on the prize ladder.
pub const LEVEL_COUNT: u8 = 12;

/// 1-based position on the prize ladder (`1..=12`).
///
/// Difficulty and prize both grow with the level. A `Level` can only be
/// built from a value inside the ladder, so pools keyed by it never hold
/// stray entries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Creates a level, returning `None` outside `1..=LEVEL_COUNT`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (1..=LEVEL_COUNT).contains(&value).then_some(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Every level in ladder order.
    pub fn all() -> impl Iterator<Item = Level> {
        (1..=LEVEL_COUNT).map(Level)
    }
}

impl TryFrom<u8> for Level {
    type Error = ParseIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or(ParseIdError { kind: "Level" })
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an identifier or level from a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(QuestionId::new)
            .map_err(|_| ParseIdError { kind: "QuestionId" })
    }
}

impl FromStr for Level {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Level::new)
            .ok_or(ParseIdError { kind: "Level" })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_question_id_from_str_invalid() {
        let result = "not-a-number".parse::<QuestionId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_level_bounds() {
        assert!(Level::new(0).is_none());
        assert!(Level::new(13).is_none());
        assert_eq!(Level::new(1).unwrap().value(), 1);
        assert_eq!(Level::try_from(12).unwrap().value(), 12);
    }

    #[test]
    fn test_level_from_str() {
        let level: Level = " 7".parse().unwrap();
        assert_eq!(level.value(), 7);
        assert!("99".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_all_is_ordered() {
        let values: Vec<u8> = Level::all().map(|l| l.value()).collect();
        assert_eq!(values, (1..=12).collect::<Vec<_>>());
    }
}
