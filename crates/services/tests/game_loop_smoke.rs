use std::sync::{Arc, Mutex};
use std::time::Duration;

use quiz_core::model::{Cue, GameOutcome, Lifeline, Question, QuestionId, QuestionPool};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::session::{AudioCues, Celebration, GameEvent, Phase};
use services::{GameLoopService, Presentation, SessionBuilder};

#[derive(Default)]
struct CueLog(Mutex<Vec<Cue>>);

impl AudioCues for CueLog {
    fn play(&self, cue: Cue) {
        self.0.lock().unwrap().push(cue);
    }
}

impl Celebration for CueLog {
    fn celebrate(&self) {}
}

fn pool() -> QuestionPool {
    let mut pool = QuestionPool::new();
    for level in 1..=12_u8 {
        for k in 0..2_u64 {
            let id = u64::from(level) * 10 + k;
            let options = vec!["A".into(), "B".into(), "C".into(), "D".into()];
            let question =
                Question::new(QuestionId::new(id), format!("Q{id}"), options, (id % 4) as usize, "1")
                    .unwrap();
            pool.insert(level, question).unwrap();
        }
    }
    pool
}

#[tokio::test(start_paused = true)]
async fn full_session_wins_through_the_loop() {
    let mut rng = StdRng::seed_from_u64(21);
    let plan = SessionBuilder::new(&pool()).build(&mut rng);
    assert_eq!(plan.total(), 12);

    let mut handle = GameLoopService::default()
        .start_session(plan.into_questions(), rng)
        .unwrap();

    let mut ended = Vec::new();
    while let Some(event) = handle.next_event().await {
        match event {
            GameEvent::QuestionChanged { question, .. } => {
                assert!(handle.submit_answer(question.correct_index()));
            }
            GameEvent::SessionEnded(outcome) => ended.push(outcome),
            _ => {}
        }
    }

    assert_eq!(ended, vec![GameOutcome::win(12)]);
    assert_eq!(handle.outcome().await, Some(GameOutcome::win(12)));
}

#[tokio::test(start_paused = true)]
async fn timer_resumes_a_full_second_after_overlay_closes() {
    let mut rng = StdRng::seed_from_u64(4);
    let plan = SessionBuilder::new(&pool()).build(&mut rng);
    let mut handle = GameLoopService::default()
        .start_session(plan.into_questions(), rng)
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(handle.snapshot().time_remaining, 28);

    assert!(handle.use_lifeline(Lifeline::ExpertAdvice));
    tokio::time::sleep(Duration::from_secs(10)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.time_remaining, 28);
    assert_eq!(
        snapshot.phase,
        Phase::Advisory {
            lifeline: Lifeline::ExpertAdvice,
            ready: true
        }
    );

    assert!(handle.close_advisory_overlay());
    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(handle.snapshot().time_remaining, 28);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(handle.snapshot().time_remaining, 27);

    // Drain what was emitted so far and confirm the advisory sequence.
    let mut saw_ready = false;
    while let Ok(event) = tokio::time::timeout(Duration::ZERO, handle.next_event()).await {
        if let Some(GameEvent::AdvisoryReady { lifeline }) = &event {
            assert_eq!(*lifeline, Lifeline::ExpertAdvice);
            saw_ready = true;
        }
        if event.is_none() {
            break;
        }
    }
    assert!(saw_ready);
}

#[tokio::test(start_paused = true)]
async fn wrong_answer_ends_after_suspense_and_failure_display() {
    let mut rng = StdRng::seed_from_u64(8);
    let plan = SessionBuilder::new(&pool()).build(&mut rng);
    let questions = plan.into_questions();
    let wrong = questions[0].wrong_indices().next().unwrap();
    let mut handle = GameLoopService::default()
        .start_session(questions, rng)
        .unwrap();

    let started = tokio::time::Instant::now();
    assert!(handle.submit_answer(wrong));
    assert_eq!(handle.outcome().await, Some(GameOutcome::loss(0)));

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(3500) && elapsed < Duration::from_millis(3600));
}

#[tokio::test(start_paused = true)]
async fn intro_melody_precedes_the_opening_whistle() {
    let log = Arc::new(CueLog::default());
    let service = GameLoopService::default()
        .with_presentation(Presentation::new(log.clone(), log.clone()));

    service.play_intro();
    let mut rng = StdRng::seed_from_u64(2);
    let plan = SessionBuilder::new(&pool()).build(&mut rng);
    let _handle = service.start_session(plan.into_questions(), rng).unwrap();

    let cues = log.0.lock().unwrap().clone();
    assert_eq!(cues, vec![Cue::IntroMelody, Cue::Whistle]);
}
