use serde::{Deserialize, Serialize};

/// One-time aids a player may invoke during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lifeline {
    /// Simulated crowd vote, biased toward the correct option.
    AudiencePoll,
    /// Recommendation from a simulated pundit with fixed accuracy.
    ExpertAdvice,
    /// Submits the correct answer on the player's behalf.
    AutoAnswer,
    /// Hides two of the three wrong options.
    OptionElimination,
}

impl Lifeline {
    pub const ALL: [Lifeline; 4] = [
        Lifeline::AudiencePoll,
        Lifeline::ExpertAdvice,
        Lifeline::AutoAnswer,
        Lifeline::OptionElimination,
    ];

    /// Whether invoking this lifeline opens an advisory overlay.
    #[must_use]
    pub fn is_advisory(self) -> bool {
        matches!(self, Lifeline::AudiencePoll | Lifeline::ExpertAdvice)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Lifeline::AudiencePoll => "audience-poll",
            Lifeline::ExpertAdvice => "expert-advice",
            Lifeline::AutoAnswer => "auto-answer",
            Lifeline::OptionElimination => "option-elimination",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Lifeline::AudiencePoll => 1,
            Lifeline::ExpertAdvice => 1 << 1,
            Lifeline::AutoAnswer => 1 << 2,
            Lifeline::OptionElimination => 1 << 3,
        }
    }
}

/// Availability flags for the four lifelines.
///
/// Every lifeline starts available and can be consumed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifelineSet {
    consumed: u8,
}

impl Default for LifelineSet {
    fn default() -> Self {
        Self::all_available()
    }
}

impl LifelineSet {
    #[must_use]
    pub fn all_available() -> Self {
        Self { consumed: 0 }
    }

    #[must_use]
    pub fn is_available(&self, lifeline: Lifeline) -> bool {
        self.consumed & lifeline.bit() == 0
    }

    /// Marks the lifeline consumed. Returns `false` if it already was.
    pub fn consume(&mut self, lifeline: Lifeline) -> bool {
        if !self.is_available(lifeline) {
            return false;
        }
        self.consumed |= lifeline.bit();
        true
    }

    /// Lifelines still available, in declaration order.
    pub fn available(&self) -> impl Iterator<Item = Lifeline> + '_ {
        Lifeline::ALL
            .into_iter()
            .filter(move |lifeline| self.is_available(*lifeline))
    }
}
