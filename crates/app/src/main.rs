use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use services::{GameLoopService, Presentation, SessionBuilder};

mod bank;
mod terminal;

use terminal::{Input, TerminalPresentation};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { origin: &'static str, raw: String },
    InvalidTime { origin: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { origin, raw } => write!(f, "invalid {origin} value: {raw}"),
            ArgsError::InvalidTime { origin, raw } => write!(f, "invalid {origin} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path.json>] [--seed <u64>] [--time <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in demo question bank, random seed, 30 second countdown");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_PATH, QUIZ_SEED, QUIZ_MAX_TIME, RUST_LOG");
}

struct Args {
    bank: Option<PathBuf>,
    seed: Option<u64>,
    max_time_secs: Option<u32>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank = std::env::var("QUIZ_BANK_PATH").ok().map(PathBuf::from);
        let mut seed = match std::env::var("QUIZ_SEED") {
            Ok(raw) => Some(parse_seed(raw, "QUIZ_SEED")?),
            Err(_) => None,
        };
        let mut max_time_secs = match std::env::var("QUIZ_MAX_TIME") {
            Ok(raw) => Some(parse_time(raw, "QUIZ_MAX_TIME")?),
            Err(_) => None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => bank = Some(PathBuf::from(require_value(args, "--bank")?)),
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?, "--seed")?),
                "--time" => {
                    max_time_secs = Some(parse_time(require_value(args, "--time")?, "--time")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            bank,
            seed,
            max_time_secs,
        })
    }
}

/// `origin` names the flag or environment variable the value came from.
fn parse_seed(raw: String, origin: &'static str) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { origin, raw })
}

fn parse_time(raw: String, origin: &'static str) -> Result<u32, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidTime { origin, raw })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let pool = match &parsed.bank {
        Some(path) => bank::load(path)?,
        None => bank::demo()?,
    };
    let missing = pool.missing_levels();
    if !missing.is_empty() {
        warn!(?missing, "question bank is incomplete, those levels will be skipped");
    }

    let mut rng = match parsed.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let plan = SessionBuilder::new(&pool).build(&mut rng);
    info!(questions = plan.total(), "session planned");
    let questions = plan.into_questions();

    let screen = Arc::new(TerminalPresentation);
    let mut service = GameLoopService::default()
        .with_presentation(Presentation::new(screen.clone(), screen));
    if let Some(secs) = parsed.max_time_secs {
        service = service.with_max_time_secs(secs)?;
    }

    service.play_intro();
    let mut handle = service.start_session(questions.clone(), rng)?;

    terminal::print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            event = handle.next_event() => {
                let Some(event) = event else { break };
                terminal::render(&event);
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match Input::parse(&line) {
                        Some(Input::Answer(index)) => { handle.submit_answer(index); }
                        Some(Input::Lifeline(lifeline)) => { handle.use_lifeline(lifeline); }
                        Some(Input::CloseOverlay) => { handle.close_advisory_overlay(); }
                        Some(Input::Quit) => {
                            info!("player walked away");
                            return Ok(());
                        }
                        None => terminal::print_help(),
                    },
                    None => stdin_open = false,
                }
            }
        }
    }

    if let Some(outcome) = handle.outcome().await {
        terminal::render_result(&outcome, &questions);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_values_name_their_origin() {
        let err = parse_seed("abc".into(), "QUIZ_SEED").unwrap_err();
        assert_eq!(err.to_string(), "invalid QUIZ_SEED value: abc");

        let err = parse_time("-3".into(), "--time").unwrap_err();
        assert_eq!(err.to_string(), "invalid --time value: -3");
    }

    #[test]
    fn flag_without_value_is_reported() {
        let mut argv = std::iter::empty::<String>();
        let err = require_value(&mut argv, "--bank").unwrap_err();
        assert_eq!(err.to_string(), "--bank requires a value");
    }
}
