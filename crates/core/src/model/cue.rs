use std::fmt;

use serde::{Deserialize, Serialize};

/// Named audio cues the game fires at its presentation layer.
///
/// Playback is fire-and-forget; a cue that fails to play never affects the
/// game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Whistle,
    Correct,
    Wrong,
    Thinking,
    Substitute,
    Cash,
    IntroMelody,
    VictoryMelody,
    LossMelody,
}

impl Cue {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Cue::Whistle => "whistle",
            Cue::Correct => "correct",
            Cue::Wrong => "wrong",
            Cue::Thinking => "thinking",
            Cue::Substitute => "substitute",
            Cue::Cash => "cash",
            Cue::IntroMelody => "intro_melody",
            Cue::VictoryMelody => "victory_melody",
            Cue::LossMelody => "loss_melody",
        }
    }

    /// Melody cues loop or play for several seconds; the rest are one-shots.
    #[must_use]
    pub fn is_melody(self) -> bool {
        matches!(self, Cue::IntroMelody | Cue::VictoryMelody | Cue::LossMelody)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
