//! Simulated lifeline content.
//!
//! All functions take the random source explicitly so that tests can seed it.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use quiz_core::model::{OPTION_COUNT, Question};

/// Lowest share the correct option receives in an audience poll.
pub const AUDIENCE_MIN_CORRECT: u8 = 60;
/// Width of the random bump added on top of [`AUDIENCE_MIN_CORRECT`].
pub const AUDIENCE_CORRECT_SPREAD: u8 = 30;

/// Percentage of the crowd backing each option. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudiencePoll {
    pub shares: [u8; OPTION_COUNT],
}

impl AudiencePoll {
    /// Option with the largest share.
    #[must_use]
    pub fn favourite(&self) -> usize {
        let mut best = 0;
        for (i, share) in self.shares.iter().enumerate() {
            if *share > self.shares[best] {
                best = i;
            }
        }
        best
    }
}

/// Stands in for the recommended option's letter inside an advisor quote.
pub const ANSWER_PLACEHOLDER: &str = "[ANS]";

const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// A simulated pundit with a fixed hit rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Advisor {
    pub name: &'static str,
    pub title: &'static str,
    /// Probability of recommending the correct option.
    pub accuracy: f64,
    /// Catchphrases, each containing [`ANSWER_PLACEHOLDER`] once.
    pub quotes: &'static [&'static str],
}

pub const ADVISORS: [Advisor; 3] = [
    Advisor {
        name: "Arsène Wenger",
        title: "Arsenal legend",
        accuracy: 0.9,
        quotes: &[
            "Confidence is fragile. It arrives on foot and leaves by plane. Trust answer [ANS]!",
            "Never be afraid to aim too high. Do not doubt option [ANS].",
            "Fighting spirit cannot be bought. Pick [ANS] and take the prize.",
            "Players are artists, I believe that. I also believe in option [ANS].",
        ],
    },
    Advisor {
        name: "Sir Alex Ferguson",
        title: "Manchester United legend",
        accuracy: 0.9,
        quotes: &[
            "It's Fergie Time! Go with [ANS] and turn it around.",
            "Give in once and you'll give in twice. Choose [ANS] and keep going.",
            "Form is temporary, class is permanent. [ANS] is class.",
            "I never played for a draw in my life. I'm taking [ANS] for the three points.",
        ],
    },
    Advisor {
        name: "Tạ Biên Cương",
        title: "TV commentator",
        accuracy: 0.25,
        quotes: &[
            "After the first half there may well be 45 minutes left. All in on [ANS].",
            "Without a goalkeeper there would probably be more than one goal! [ANS] is a proper keeper.",
            "Football has no borders, and neither does my love for it! Pick [ANS]!",
            "Not an empty seat in the stadium tonight. Answer [ANS] has just been revealed.",
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpertAdvice {
    pub advisor: Advisor,
    pub recommended: usize,
    /// One of `advisor.quotes`, still holding the placeholder.
    pub quote: &'static str,
}

impl ExpertAdvice {
    /// The quote with the recommended option's letter filled in.
    #[must_use]
    pub fn remark(&self) -> String {
        let letter = OPTION_LETTERS.get(self.recommended).copied().unwrap_or('?');
        self.quote.replacen(ANSWER_PLACEHOLDER, &letter.to_string(), 1)
    }
}

/// Payload attached to a consumed lifeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    Audience(AudiencePoll),
    Expert(ExpertAdvice),
    Eliminated { hidden: [usize; 2] },
}

/// Crowd vote biased toward the correct option.
///
/// The correct option gets 60-89%. Each wrong option in turn takes a random
/// slice of what is left, and any remainder goes to the first wrong option.
pub fn audience_poll<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> AudiencePoll {
    let correct = question.correct_index();
    let mut shares = [0_u8; OPTION_COUNT];

    shares[correct] = AUDIENCE_MIN_CORRECT + rng.random_range(0..AUDIENCE_CORRECT_SPREAD);
    let mut remaining = 100 - shares[correct];

    for wrong in question.wrong_indices() {
        if remaining == 0 {
            break;
        }
        let share = rng.random_range(0..remaining);
        shares[wrong] = share;
        remaining -= share;
    }
    if let Some(first_wrong) = question.wrong_indices().next() {
        shares[first_wrong] += remaining;
    }

    AudiencePoll { shares }
}

/// Pick an advisor uniformly, then let their accuracy decide whether the
/// recommendation is right. A wrong recommendation is uniform over the wrong
/// options.
pub fn expert_advice<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> ExpertAdvice {
    let advisor = ADVISORS[rng.random_range(0..ADVISORS.len())];
    let recommended = if rng.random_bool(advisor.accuracy) {
        question.correct_index()
    } else {
        let wrong: Vec<usize> = question.wrong_indices().collect();
        wrong[rng.random_range(0..wrong.len())]
    };

    let quote = advisor
        .quotes
        .choose(rng)
        .copied()
        .unwrap_or(ANSWER_PLACEHOLDER);

    ExpertAdvice {
        advisor,
        recommended,
        quote,
    }
}

/// Two of the three wrong options, chosen uniformly, in ascending order.
pub fn eliminate_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> [usize; 2] {
    let mut wrong: Vec<usize> = question.wrong_indices().collect();
    wrong.shuffle(rng);
    let mut hidden = [wrong[0], wrong[1]];
    hidden.sort_unstable();
    hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(correct: usize) -> Question {
        let options = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        Question::new(QuestionId::new(1), "Q", options, correct, "1").unwrap()
    }

    #[test]
    fn audience_poll_sums_to_100_and_favours_correct() {
        let mut rng = StdRng::seed_from_u64(3);
        for seed_round in 0..500 {
            let q = question(seed_round % 4);
            let poll = audience_poll(&q, &mut rng);
            let total: u32 = poll.shares.iter().map(|s| u32::from(*s)).sum();
            assert_eq!(total, 100);
            let correct_share = poll.shares[q.correct_index()];
            assert!((60..=89).contains(&correct_share), "share {correct_share}");
            assert_eq!(poll.favourite(), q.correct_index());
        }
    }

    #[test]
    fn expert_advice_follows_advisor_accuracy() {
        let mut rng = StdRng::seed_from_u64(11);
        let q = question(2);
        let mut hits = 0_u32;
        let rounds = 3000;
        for _ in 0..rounds {
            let advice = expert_advice(&q, &mut rng);
            assert!(advice.recommended < 4);
            assert!(ADVISORS.contains(&advice.advisor));
            if advice.recommended == 2 {
                hits += 1;
            }
        }
        // Expected hit rate is (0.9 + 0.9 + 0.25) / 3 ≈ 0.683.
        let rate = f64::from(hits) / f64::from(rounds);
        assert!((0.6..0.77).contains(&rate), "rate {rate}");
    }

    #[test]
    fn expert_quote_comes_from_advisor_and_names_the_pick() {
        let mut rng = StdRng::seed_from_u64(17);
        let q = question(1);
        for _ in 0..200 {
            let advice = expert_advice(&q, &mut rng);
            assert!(advice.advisor.quotes.contains(&advice.quote));

            let remark = advice.remark();
            let letter = OPTION_LETTERS[advice.recommended];
            assert!(!remark.contains(ANSWER_PLACEHOLDER), "{remark}");
            assert!(remark.contains(letter), "{remark}");
        }
    }

    #[test]
    fn every_quote_has_one_placeholder() {
        for advisor in ADVISORS {
            assert!(!advisor.quotes.is_empty());
            for quote in advisor.quotes {
                assert_eq!(quote.matches(ANSWER_PLACEHOLDER).count(), 1, "{quote}");
            }
        }
    }

    #[test]
    fn unreliable_advisor_recommends_wrong_options_uniformly() {
        let mut rng = StdRng::seed_from_u64(5);
        let q = question(0);
        let mut counts = [0_u32; 4];
        for _ in 0..3000 {
            let advice = expert_advice(&q, &mut rng);
            counts[advice.recommended] += 1;
        }
        for wrong in 1..4 {
            assert!(counts[wrong] > 200, "counts {counts:?}");
        }
    }

    #[test]
    fn elimination_never_hides_correct_option() {
        let mut rng = StdRng::seed_from_u64(9);
        for correct in 0..4 {
            let q = question(correct);
            for _ in 0..100 {
                let hidden = eliminate_options(&q, &mut rng);
                assert_ne!(hidden[0], hidden[1]);
                assert!(!hidden.contains(&correct));
                assert!(hidden[0] < hidden[1]);
            }
        }
    }
}
