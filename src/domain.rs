//! Domain models produced by the generation pipeline.

use serde::{Deserialize, Serialize};

/// Where did the pipeline input come from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
  /// Text pasted by the user.
  Text,
  /// Boilerplate paragraph synthesized from a topic name.
  Topic,
}

/// One multiple-choice question with four shuffled options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub text: String,
  pub options: Vec<String>,
  /// 'A'..='D', index of the correct option after shuffling.
  pub correct_label: char,
}

impl QuizQuestion {
  /// The option the label points at.
  pub fn correct_option(&self) -> Option<&str> {
    let idx = (self.correct_label as u32).checked_sub('A' as u32)? as usize;
    self.options.get(idx).map(String::as_str)
  }
}

/// Basic statistics of the input text.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
  pub word_count: usize,
  pub sentence_count: usize,
}

/// Everything the front end renders for one generation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
  pub id: String,
  pub source: InputSource,
  pub assignments: Vec<String>,
  pub quiz_questions: Vec<QuizQuestion>,
  pub concepts: Vec<String>,
  pub word_count: usize,
  pub sentence_count: usize,
}
