//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Resolving the request input (pasted text vs. topic boilerplate)
//!   - Running extraction, assignment and quiz generation
//!   - Text statistics for the analysis view

use axum::{http::StatusCode, response::IntoResponse, Json};
use rand::Rng;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::assignments::AssignmentGenerator;
use crate::concepts::extract_key_concepts;
use crate::domain::{GeneratedContent, InputSource, QuizQuestion, TextStats};
use crate::protocol::{ConceptsOut, WarningOut};
use crate::quiz::QuizGenerator;
use crate::state::AppState;
use crate::util::{fill_template, sentence_count, title_case, word_count};

/// Shell-side guard failures. The pipeline itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
  #[error("Please provide some input text or topic to generate content.")]
  EmptyInput,
}

impl IntoResponse for GenerateError {
  fn into_response(self) -> axum::response::Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(WarningOut { warning: self.to_string() })).into_response()
  }
}

/// The three generators, run in sequence per request.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
  pub assignments: AssignmentGenerator,
  pub quiz: QuizGenerator,
}

#[derive(Clone, Debug)]
pub struct PipelineOutput {
  pub concepts: Vec<String>,
  pub assignments: Vec<String>,
  pub quiz_questions: Vec<QuizQuestion>,
}

impl Pipeline {
  pub fn run<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> PipelineOutput {
    let concepts = extract_key_concepts(text);
    let assignments = self.assignments.generate(&concepts, rng);
    let quiz_questions = self.quiz.generate(text, &concepts, rng);
    PipelineOutput { concepts, assignments, quiz_questions }
  }
}

/// Expand a topic name into the boilerplate paragraph.
pub fn expand_topic(topic_template: &str, topic: &str) -> String {
  fill_template(topic_template, &[("topic", topic)])
}

/// Pick the pipeline input: non-blank text wins, then a non-blank topic.
/// The topic is embedded exactly as given.
pub fn resolve_input(
  topic_template: &str,
  text: Option<&str>,
  topic: Option<&str>,
) -> Result<(String, InputSource), GenerateError> {
  if let Some(t) = text.filter(|t| !t.trim().is_empty()) {
    return Ok((t.to_string(), InputSource::Text));
  }
  if let Some(topic) = topic.filter(|t| !t.trim().is_empty()) {
    return Ok((expand_topic(topic_template, topic), InputSource::Topic));
  }
  Err(GenerateError::EmptyInput)
}

pub fn text_stats(text: &str) -> TextStats {
  TextStats { word_count: word_count(text), sentence_count: sentence_count(text) }
}

/// Concepts with their display labels, for the analysis view.
pub fn concept_labels(concepts: &[String]) -> Vec<String> {
  concepts.iter().map(|c| title_case(c)).collect()
}

/// Extraction alone, for the "key concepts" analysis view.
#[instrument(level = "info", skip(text), fields(text_len = text.len()))]
pub fn analyze_concepts(text: &str) -> ConceptsOut {
  let concepts = extract_key_concepts(text);
  let labels = concept_labels(&concepts);
  ConceptsOut { count: concepts.len(), concepts, labels }
}

#[instrument(level = "info", skip(state, text, topic), fields(text_len = text.map(str::len).unwrap_or(0), has_topic = topic.is_some()))]
pub async fn generate_content(
  state: &AppState,
  text: Option<&str>,
  topic: Option<&str>,
) -> Result<GeneratedContent, GenerateError> {
  let (input, source) = resolve_input(&state.topic_template, text, topic)?;
  let stats = text_stats(&input);

  let out = {
    let mut rng = state.rng.lock().await;
    state.pipeline.run(&input, &mut *rng)
  };

  let content = GeneratedContent {
    id: Uuid::new_v4().to_string(),
    source,
    assignments: out.assignments,
    quiz_questions: out.quiz_questions,
    concepts: out.concepts,
    word_count: stats.word_count,
    sentence_count: stats.sentence_count,
  };
  info!(
    target: "quizgen",
    id = %content.id,
    ?source,
    concepts = content.concepts.len(),
    assignments = content.assignments.len(),
    words = content.word_count,
    sentences = content.sentence_count,
    "Content generated"
  );
  Ok(content)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{GeneratorConfig, TOPIC_TEMPLATE};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const PHOTO: &str =
    "Photosynthesis is a process. Photosynthesis occurs in plants. Plants use Photosynthesis to create energy.";

  #[test]
  fn photosynthesis_end_to_end() {
    let mut rng = StdRng::seed_from_u64(11);
    let out = Pipeline::default().run(PHOTO, &mut rng);
    assert!(out.concepts.contains(&"photosynthesis".to_string()));
    assert!(out.assignments.iter().any(|a| a.contains("Photosynthesis")));
    assert_eq!(out.quiz_questions.len(), 3);
    assert!(out.quiz_questions[0].text.contains("Photosynthesis"));
  }

  #[test]
  fn gravity_topic_expands_to_six_mentions() {
    let (text, source) = resolve_input(TOPIC_TEMPLATE, None, Some("Gravity")).expect("topic input");
    assert_eq!(source, InputSource::Topic);
    assert_eq!(text.matches("Gravity").count(), 6);
    assert_eq!(text_stats(&text).sentence_count, 6);

    let concepts = extract_key_concepts(&text);
    assert!(concepts.contains(&"gravity".to_string()), "{concepts:?}");
  }

  #[test]
  fn lowercase_topic_is_found_by_frequency() {
    let text = expand_topic(TOPIC_TEMPLATE, "gravity");
    let concepts = extract_key_concepts(&text);
    assert!(concepts.contains(&"gravity".to_string()), "{concepts:?}");
  }

  #[test]
  fn text_takes_precedence_over_topic() {
    let (text, source) = resolve_input(TOPIC_TEMPLATE, Some("Pasted text."), Some("Gravity")).expect("input");
    assert_eq!(source, InputSource::Text);
    assert_eq!(text, "Pasted text.");
  }

  #[test]
  fn blank_input_is_rejected_before_the_pipeline() {
    assert_eq!(resolve_input(TOPIC_TEMPLATE, None, None), Err(GenerateError::EmptyInput));
    assert_eq!(resolve_input(TOPIC_TEMPLATE, Some("  \n"), Some("   ")), Err(GenerateError::EmptyInput));
  }

  #[test]
  fn topic_is_embedded_verbatim() {
    let (text, _) = resolve_input(TOPIC_TEMPLATE, None, Some(" Gravity ")).expect("input");
    assert!(text.starts_with(" Gravity  is an important subject"), "{text}");
    assert_eq!(text.matches(" Gravity ").count(), 6);
  }

  #[test]
  fn blank_text_falls_through_to_topic() {
    let (_, source) = resolve_input(TOPIC_TEMPLATE, Some("   "), Some("Gravity")).expect("input");
    assert_eq!(source, InputSource::Topic);
  }

  #[test]
  fn no_concepts_gives_generic_quiz_and_fallback_assignments() {
    let mut rng = StdRng::seed_from_u64(2);
    let out = Pipeline::default().run("a b c. d e f.", &mut rng);
    assert!(out.concepts.is_empty());
    assert_eq!(out.assignments.len(), 2);
    assert_eq!(out.quiz_questions.len(), 3);
    assert!(out.quiz_questions.iter().all(|q| q.text == crate::quiz::GENERIC_QUESTION));
  }

  #[test]
  fn labels_are_title_cased() {
    let labels = concept_labels(&["gravity".to_string(), "plants".to_string()]);
    assert_eq!(labels, vec!["Gravity".to_string(), "Plants".to_string()]);
  }

  #[test]
  fn analyze_concepts_reports_labels_and_count() {
    let out = analyze_concepts(PHOTO);
    assert_eq!(out.count, 2);
    assert_eq!(out.labels, vec!["Photosynthesis".to_string(), "Plants".to_string()]);
    assert_eq!(analyze_concepts("").count, 0);
  }

  #[tokio::test]
  async fn generate_content_fills_the_output_contract() {
    let cfg = GeneratorConfig { seed: Some(5), ..GeneratorConfig::default() };
    let state = AppState::from_config(cfg);
    let content = generate_content(&state, Some(PHOTO), None).await.expect("content");
    assert_eq!(content.source, InputSource::Text);
    assert_eq!(content.word_count, 14);
    assert_eq!(content.sentence_count, 3);
    assert!(content.assignments.len() <= 2);
    assert_eq!(content.quiz_questions.len(), 3);
    for q in &content.quiz_questions {
      assert_eq!(q.options.len(), 4);
      assert!(q.correct_option().is_some());
    }
  }

  #[tokio::test]
  async fn generate_content_rejects_blank_input() {
    let state = AppState::from_config(GeneratorConfig::default());
    let err = generate_content(&state, Some(""), None).await.unwrap_err();
    assert_eq!(err, GenerateError::EmptyInput);
  }
}
