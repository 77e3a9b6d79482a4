pub mod advisory;
mod events;
mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{Rejection, SessionError};
pub use advisory::{Advisor, Advisory, AudiencePoll, ExpertAdvice};
pub use events::{AudioCues, Celebration, EventSink, GameEvent, NullSink, Presentation, Silent};
pub use plan::{SessionBuilder, SessionPlan};
pub use progress::{GameSnapshot, Phase};
pub use service::{PendingAction, ProgressionEngine, Scheduled};
pub use workflow::{EngineHandle, GameLoopService};
