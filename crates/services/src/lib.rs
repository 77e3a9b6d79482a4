#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use sessions as session;

pub use error::{Rejection, SessionError};

pub use sessions::{
    EngineHandle, GameEvent, GameLoopService, GameSnapshot, Phase, Presentation,
    ProgressionEngine, SessionBuilder, SessionPlan,
};
