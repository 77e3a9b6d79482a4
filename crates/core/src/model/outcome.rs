use serde::{Deserialize, Serialize};

use crate::model::question::Question;

/// Indices of the safe-haven levels, highest first. Their prize is kept when
/// the player later answers wrong or runs out of time.
pub const SAFE_HAVEN_INDICES: [usize; 2] = [9, 4];

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    /// On a loss, the 0-based index of the question that ended the game.
    /// On a win, the number of questions answered.
    pub level_reached: usize,
}

impl GameOutcome {
    /// A completed session of `level_reached` questions.
    ///
    /// The engine passes the session length, which is 12 for a complete pool.
    /// A session built from a pool with skipped levels wins at its own, shorter
    /// length, and `prize_won` still pays its last question.
    #[must_use]
    pub fn win(level_reached: usize) -> Self {
        Self {
            won: true,
            level_reached,
        }
    }

    #[must_use]
    pub fn loss(at_index: usize) -> Self {
        Self {
            won: false,
            level_reached: at_index,
        }
    }

    /// Prize the player walks away with.
    ///
    /// A win pays the last question's prize. A loss falls back to the highest
    /// safe haven reached, or nothing below the first one.
    #[must_use]
    pub fn prize_won<'a>(&self, questions: &'a [Question]) -> Option<&'a str> {
        if self.won {
            return questions.last().map(Question::prize);
        }
        SAFE_HAVEN_INDICES
            .into_iter()
            .find(|&haven| self.level_reached >= haven)
            .and_then(|haven| questions.get(haven))
            .map(Question::prize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuestionId;

    fn ladder() -> Vec<Question> {
        (0..12)
            .map(|i| {
                let options = vec!["a".into(), "b".into(), "c".into(), "d".into()];
                Question::new(QuestionId::new(i), "Q", options, 0, format!("P{i}")).unwrap()
            })
            .collect()
    }

    #[test]
    fn win_pays_top_prize() {
        let qs = ladder();
        assert_eq!(GameOutcome::win(12).prize_won(&qs), Some("P11"));
    }

    #[test]
    fn short_session_win_pays_its_last_question() {
        let qs: Vec<Question> = ladder().into_iter().take(3).collect();
        let outcome = GameOutcome::win(qs.len());
        assert_eq!(outcome.level_reached, 3);
        assert_eq!(outcome.prize_won(&qs), Some("P2"));
    }

    #[test]
    fn loss_falls_back_to_safe_haven() {
        let qs = ladder();
        assert_eq!(GameOutcome::loss(0).prize_won(&qs), None);
        assert_eq!(GameOutcome::loss(3).prize_won(&qs), None);
        assert_eq!(GameOutcome::loss(4).prize_won(&qs), Some("P4"));
        assert_eq!(GameOutcome::loss(8).prize_won(&qs), Some("P4"));
        assert_eq!(GameOutcome::loss(9).prize_won(&qs), Some("P9"));
        assert_eq!(GameOutcome::loss(11).prize_won(&qs), Some("P9"));
    }
}
