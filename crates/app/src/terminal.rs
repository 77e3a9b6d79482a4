//! Line-based front-end: renders engine events to stdout and maps typed
//! commands onto engine inputs.

use tracing::info;

use quiz_core::model::{Cue, GameOutcome, Lifeline, Question};
use services::session::{Advisory, AudiencePoll, AudioCues, Celebration, GameEvent};

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Stand-in for speakers and confetti.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPresentation;

impl AudioCues for TerminalPresentation {
    fn play(&self, cue: Cue) {
        info!(%cue, "cue");
        if cue.is_melody() {
            println!("    ♪ {cue} ♪");
        }
    }
}

impl Celebration for TerminalPresentation {
    fn celebrate(&self) {
        println!("    * * *  GOAL!  * * *");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Answer(usize),
    Lifeline(Lifeline),
    CloseOverlay,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim().to_ascii_lowercase();
        let input = match word.as_str() {
            "a" => Input::Answer(0),
            "b" => Input::Answer(1),
            "c" => Input::Answer(2),
            "d" => Input::Answer(3),
            "aud" | "audience" => Input::Lifeline(Lifeline::AudiencePoll),
            "exp" | "expert" => Input::Lifeline(Lifeline::ExpertAdvice),
            "auto" | "var" => Input::Lifeline(Lifeline::AutoAnswer),
            "50" | "sub" => Input::Lifeline(Lifeline::OptionElimination),
            "ok" | "close" => Input::CloseOverlay,
            "q" | "quit" => Input::Quit,
            _ => return None,
        };
        Some(input)
    }
}

pub fn print_help() {
    println!("Commands: a/b/c/d answer | aud, exp, auto, 50 lifelines | ok close panel | q quit");
}

pub fn render(event: &GameEvent) {
    match event {
        GameEvent::QuestionChanged { index, question } => render_question(*index, question),
        GameEvent::TimerUpdated { seconds_remaining } => {
            if *seconds_remaining <= 5 || seconds_remaining % 10 == 0 {
                println!("  ⏱  {seconds_remaining}s");
            }
        }
        GameEvent::LifelineConsumed { lifeline, advisory } => {
            println!("  {}", lifeline_banner(*lifeline));
            if let Some(advisory) = advisory {
                render_advisory(advisory);
            }
        }
        GameEvent::AdvisoryReady { .. } => println!("  (type `ok` to close the panel)"),
        GameEvent::AnswerOutcome { correct: true } => println!("  Correct!"),
        GameEvent::AnswerOutcome { correct: false } => println!("  Wrong answer."),
        GameEvent::SessionEnded(_) => {}
    }
}

fn render_question(index: usize, question: &Question) {
    println!();
    println!(
        "Question {} for {} VNĐ",
        index + 1,
        format_prize(question.prize())
    );
    println!("  {}", question.prompt());
    for (letter, option) in LETTERS.iter().zip(question.options()) {
        println!("    {letter}. {option}");
    }
}

fn lifeline_banner(lifeline: Lifeline) -> String {
    if lifeline.is_advisory() {
        format!("[{}] connecting...", lifeline.as_str())
    } else {
        format!("[{}]", lifeline.as_str())
    }
}

/// One bar per option; the crowd favourite is flagged.
fn poll_lines(poll: &AudiencePoll) -> Vec<String> {
    let favourite = poll.favourite();
    LETTERS
        .iter()
        .zip(poll.shares)
        .enumerate()
        .map(|(i, (letter, share))| {
            let bar = "#".repeat(usize::from(share) / 4);
            let mark = if i == favourite { " <" } else { "" };
            format!("{letter} {share:>3}% {bar}{mark}")
        })
        .collect()
}

fn render_advisory(advisory: &Advisory) {
    match advisory {
        Advisory::Audience(poll) => {
            for line in poll_lines(poll) {
                println!("    {line}");
            }
        }
        Advisory::Expert(advice) => {
            println!("    {} ({})", advice.advisor.name, advice.advisor.title);
            println!("    \"{}\"", advice.remark());
        }
        Advisory::Eliminated { hidden } => {
            println!(
                "    Options {} and {} are off the pitch.",
                LETTERS[hidden[0]], LETTERS[hidden[1]]
            );
        }
    }
}

pub fn render_result(outcome: &GameOutcome, questions: &[Question]) {
    println!();
    if outcome.won {
        println!("Champion! All {} questions answered.", outcome.level_reached);
    } else {
        println!("Game over at question {}.", outcome.level_reached + 1);
    }
    let prize = outcome.prize_won(questions).map_or_else(|| "0".to_owned(), format_prize);
    println!("You take home {prize} VNĐ.");
}

/// Prize strings are whole millions.
fn format_prize(prize: &str) -> String {
    format!("{prize}.000.000")
}
