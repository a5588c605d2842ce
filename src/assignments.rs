//! Essay-style assignment prompts built from extracted concepts.
//!
//! Concept `i` fills template `i mod N`. When fewer than two concepts are
//! available the remaining slots are backfilled with [`FALLBACK_TOPIC`] using a
//! randomly chosen template that no existing assignment already uses.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::util::{fill_template, title_case};

/// Number of assignments produced per request.
pub const ASSIGNMENTS_PER_REQUEST: usize = 2;

/// Topic used when the text did not yield enough concepts.
pub const FALLBACK_TOPIC: &str = "the main topic discussed";

/// Built-in prompt templates. `{topic}` is the only placeholder.
pub const ASSIGNMENT_TEMPLATES: [&str; 5] = [
  "Write a comprehensive essay analyzing {topic}. Discuss its key components, significance, and implications.",
  "Compare and contrast different aspects of {topic}. Provide specific examples and explain their relevance.",
  "Evaluate the importance of {topic} in its broader context. Support your arguments with evidence and reasoning.",
  "Examine the relationship between {topic} and related concepts. How do they influence each other?",
  "Create a detailed analysis of {topic}, including its causes, effects, and potential solutions or applications.",
];

#[derive(Clone, Debug)]
pub struct AssignmentGenerator {
  templates: Vec<String>,
}

impl Default for AssignmentGenerator {
  fn default() -> Self {
    Self::new(ASSIGNMENT_TEMPLATES.iter().map(|t| t.to_string()).collect())
  }
}

impl AssignmentGenerator {
  /// Templates are expected to be validated (non-empty, `{topic}` only).
  pub fn new(templates: Vec<String>) -> Self {
    Self { templates }
  }

  /// Produce up to [`ASSIGNMENTS_PER_REQUEST`] assignments.
  #[instrument(level = "debug", skip(self, concepts, rng), fields(concepts = concepts.len()))]
  pub fn generate<R: Rng + ?Sized>(&self, concepts: &[String], rng: &mut R) -> Vec<String> {
    let mut assignments = Vec::with_capacity(ASSIGNMENTS_PER_REQUEST);
    if self.templates.is_empty() {
      warn!(target: "quizgen", "No assignment templates configured");
      return assignments;
    }

    // Indices of templates already filled in this request.
    let mut used: Vec<usize> = Vec::with_capacity(ASSIGNMENTS_PER_REQUEST);

    for (i, concept) in concepts.iter().take(ASSIGNMENTS_PER_REQUEST).enumerate() {
      let idx = i % self.templates.len();
      let topic = title_case(concept);
      assignments.push(fill_template(&self.templates[idx], &[("topic", topic.as_str())]));
      used.push(idx);
    }

    while assignments.len() < ASSIGNMENTS_PER_REQUEST {
      let remaining: Vec<usize> = (0..self.templates.len())
        .filter(|idx| !used.contains(idx))
        .filter(|&idx| !assignments.iter().any(|a| template_used_in(&self.templates[idx], a)))
        .collect();
      match remaining.choose(rng) {
        Some(&idx) => {
          assignments.push(fill_template(&self.templates[idx], &[("topic", FALLBACK_TOPIC)]));
          used.push(idx);
        }
        None => {
          warn!(target: "quizgen", produced = assignments.len(), "Assignment templates exhausted");
          break;
        }
      }
    }

    debug!(target: "quizgen", produced = assignments.len(), "Assignments generated");
    assignments
  }
}

/// Heuristic: a template counts as used when every literal piece around its
/// `{topic}` placeholder shows up in the assignment text. A template with no
/// literal text never matches.
fn template_used_in(template: &str, assignment: &str) -> bool {
  let mut pieces = template
    .split("{topic}")
    .map(str::trim)
    .filter(|piece| !piece.is_empty())
    .peekable();
  pieces.peek().is_some() && pieces.all(|piece| assignment.contains(piece))
}
