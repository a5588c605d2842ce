//! Multiple-choice quiz generation.
//!
//! Three questions per request: one per leading concept, or a generic
//! question for each missing concept. Options are shuffled and the correct
//! label is derived from where the correct answer landed.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::QuizQuestion;
use crate::util::title_case;

/// Number of questions produced per request.
pub const QUESTIONS_PER_REQUEST: usize = 3;

/// Built-in question openers; the concept is appended.
pub const QUESTION_STEMS: [&str; 5] = [
  "What is the main concept behind",
  "Which of the following best describes",
  "What are the key characteristics of",
  "Which statement is most accurate about",
  "What is the primary purpose of",
];

/// Distractor wordings; set `i` is used for question `i`. `{}` is the concept.
const DISTRACTOR_SETS: [[&str; 3]; QUESTIONS_PER_REQUEST] = [
  [
    "{} is not mentioned in the context",
    "{} is only briefly referenced",
    "{} is contradicted by the main argument",
  ],
  [
    "{} has no practical applications",
    "{} is an outdated concept",
    "{} is purely theoretical",
  ],
  [
    "{} is the least important aspect",
    "{} is a minor detail",
    "{} is incorrectly defined",
  ],
];

const CORRECT_TEMPLATE: &str = "{} is a key concept discussed in the text";

pub const GENERIC_QUESTION: &str = "Based on the text, which statement is most accurate?";
pub const GENERIC_CORRECT: &str = "The text provides valuable information on the topic";
const GENERIC_WRONG: [&str; 3] = [
  "The text contradicts itself frequently",
  "The text lacks any coherent structure",
  "The text is purely fictional",
];

const LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Clone, Debug)]
pub struct QuizGenerator {
  stems: Vec<String>,
}

impl Default for QuizGenerator {
  fn default() -> Self {
    Self::new(QUESTION_STEMS.iter().map(|s| s.to_string()).collect())
  }
}

impl QuizGenerator {
  pub fn new(stems: Vec<String>) -> Self {
    Self { stems }
  }

  /// Always returns [`QUESTIONS_PER_REQUEST`] questions.
  ///
  /// `_text` is accepted for interface parity with the extractor; the
  /// question content depends on the concepts only.
  #[instrument(level = "debug", skip(self, _text, concepts, rng), fields(concepts = concepts.len()))]
  pub fn generate<R: Rng + ?Sized>(&self, _text: &str, concepts: &[String], rng: &mut R) -> Vec<QuizQuestion> {
    let mut questions = Vec::with_capacity(QUESTIONS_PER_REQUEST);
    for (i, wrong_set) in DISTRACTOR_SETS.iter().enumerate() {
      let (text, correct, wrongs) = match concepts.get(i) {
        Some(concept) => {
          let display = title_case(concept);
          let stem = self
            .stems
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(QUESTION_STEMS[0]);
          let wrongs: Vec<String> = wrong_set.iter().map(|w| w.replace("{}", &display)).collect();
          // Title-cased in the question too, matching the options.
          (
            format!("{} {}?", stem, display),
            CORRECT_TEMPLATE.replace("{}", &display),
            wrongs,
          )
        }
        None => (
          GENERIC_QUESTION.to_string(),
          GENERIC_CORRECT.to_string(),
          GENERIC_WRONG.iter().map(|w| w.to_string()).collect(),
        ),
      };

      let (options, correct_label) = shuffle_and_label(&correct, &wrongs, rng);
      let question = QuizQuestion { text, options, correct_label };
      debug_assert_eq!(question.correct_option(), Some(correct.as_str()));
      questions.push(question);
    }

    debug!(
      target: "quizgen",
      from_concepts = concepts.len().min(QUESTIONS_PER_REQUEST),
      generic = QUESTIONS_PER_REQUEST.saturating_sub(concepts.len()),
      "Quiz generated"
    );
    questions
  }
}

/// Shuffle `correct` together with `wrongs` and report the letter under which
/// the correct answer ended up (first value-equal match).
pub fn shuffle_and_label<R: Rng + ?Sized>(correct: &str, wrongs: &[String], rng: &mut R) -> (Vec<String>, char) {
  let mut options: Vec<String> = Vec::with_capacity(wrongs.len() + 1);
  options.push(correct.to_string());
  options.extend(wrongs.iter().cloned());
  options.shuffle(rng);

  let idx = options.iter().position(|o| o == correct).unwrap_or(0);
  let label = LABELS.get(idx).copied().unwrap_or('A');
  (options, label)
}
