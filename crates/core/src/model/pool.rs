use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::Level;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PoolError {
    #[error("level {0} is outside 1..=12")]
    LevelOutOfRange(u8),
}

/// Candidate questions grouped by level.
///
/// Reference data for the session builder. Serialized as an object keyed by
/// level number, each value a list of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionPool {
    levels: BTreeMap<Level, Vec<Question>>,
}

impl QuestionPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate question for the given 1-based level.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::LevelOutOfRange` if `level` is not on the ladder.
    pub fn insert(&mut self, level: u8, question: Question) -> Result<(), PoolError> {
        let level = Level::new(level).ok_or(PoolError::LevelOutOfRange(level))?;
        self.levels.entry(level).or_default().push(question);
        Ok(())
    }

    /// Candidates for a level; empty when the level has none.
    #[must_use]
    pub fn candidates(&self, level: Level) -> &[Question] {
        self.levels.get(&level).map_or(&[][..], Vec::as_slice)
    }

    /// Levels that have no candidate questions.
    #[must_use]
    pub fn missing_levels(&self) -> Vec<Level> {
        Level::all()
            .filter(|level| self.candidates(*level).is_empty())
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_levels().is_empty()
    }

    /// Total number of candidate questions across all levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuestionId;

    fn question(id: u64) -> Question {
        let options = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        Question::new(QuestionId::new(id), format!("Q{id}"), options, 1, "1").unwrap()
    }

    #[test]
    fn insert_rejects_levels_off_the_ladder() {
        let mut pool = QuestionPool::new();
        assert_eq!(pool.insert(0, question(1)), Err(PoolError::LevelOutOfRange(0)));
        assert_eq!(pool.insert(13, question(1)), Err(PoolError::LevelOutOfRange(13)));
        assert!(pool.is_empty());
    }

    #[test]
    fn missing_levels_lists_empty_levels() {
        let mut pool = QuestionPool::new();
        for level in 1..=12 {
            if level != 4 && level != 9 {
                pool.insert(level, question(u64::from(level))).unwrap();
            }
        }
        let missing: Vec<u8> = pool.missing_levels().iter().map(Level::value).collect();
        assert_eq!(missing, vec![4, 9]);
        assert!(!pool.is_complete());
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn deserializes_from_level_keyed_object() {
        let json = r#"{
            "1": [{"id":1,"prompt":"Q1","options":["a","b","c","d"],"correct_index":0,"prize":"1"}],
            "2": [{"id":2,"prompt":"Q2","options":["a","b","c","d"],"correct_index":3,"prize":"2"},
                  {"id":3,"prompt":"Q3","options":["a","b","c","d"],"correct_index":1,"prize":"2"}]
        }"#;
        let pool: QuestionPool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.candidates(Level::new(2).unwrap()).len(), 2);
        assert_eq!(pool.missing_levels().len(), 10);
    }

    #[test]
    fn deserialization_rejects_unknown_level() {
        let json = r#"{"13": []}"#;
        assert!(serde_json::from_str::<QuestionPool>(json).is_err());
    }
}
