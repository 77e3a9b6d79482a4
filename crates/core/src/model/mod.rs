mod cue;
mod ids;
mod lifeline;
mod outcome;
mod pool;
mod question;
mod settings;

pub use ids::{LEVEL_COUNT, Level, ParseIdError, QuestionId};

pub use cue::Cue;
pub use lifeline::{Lifeline, LifelineSet};
pub use outcome::{GameOutcome, SAFE_HAVEN_INDICES};
pub use pool::{PoolError, QuestionPool};
pub use question::{OPTION_COUNT, Question, QuestionError, QuestionRecord};
pub use settings::{GameSettings, SettingsError};
