use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use quiz_core::model::QuestionPool;

const DEMO_BANK: &str = include_str!("../assets/demo_bank.json");

#[derive(Debug)]
pub enum BankError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { origin: String, source: serde_json::Error },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::Read { path, source } => {
                write!(f, "cannot read question bank {}: {source}", path.display())
            }
            BankError::Parse { origin, source } => {
                write!(f, "invalid question bank {origin}: {source}")
            }
        }
    }
}

impl std::error::Error for BankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BankError::Read { source, .. } => Some(source),
            BankError::Parse { source, .. } => Some(source),
        }
    }
}

/// Load a question bank from a JSON file keyed by level.
pub fn load(path: &Path) -> Result<QuestionPool, BankError> {
    let raw = std::fs::read_to_string(path).map_err(|source| BankError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pool = parse(&raw, &path.display().to_string())?;
    debug!(path = %path.display(), questions = pool.len(), "question bank loaded");
    Ok(pool)
}

/// The bundled football bank, two candidates per level.
pub fn demo() -> Result<QuestionPool, BankError> {
    parse(DEMO_BANK, "(built-in)")
}

fn parse(raw: &str, origin: &str) -> Result<QuestionPool, BankError> {
    serde_json::from_str(raw).map_err(|source| BankError::Parse {
        origin: origin.to_owned(),
        source,
    })
}
