//! Loading generator configuration (templates, stems, topic boilerplate, RNG seed) from TOML.
//!
//! Every field is optional; missing fields keep the built-in defaults.
//!
//! ```toml
//! seed = 42
//! assignment_templates = ["Discuss {topic} in detail."]
//! question_stems = ["What best describes"]
//! topic_template = "{topic} is a subject. ..."
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::assignments::ASSIGNMENT_TEMPLATES;
use crate::quiz::QUESTION_STEMS;

/// Boilerplate paragraph used when the user only supplies a topic.
/// Six sentences, each embedding the topic once.
pub const TOPIC_TEMPLATE: &str = "{topic} is an important subject that involves multiple key concepts and principles. \
Understanding {topic} requires knowledge of its fundamental components, processes, and applications. \
The study of {topic} encompasses various aspects including its historical development, current applications, and future implications. \
Key elements of {topic} include its theoretical foundations, practical implementations, and relationship to other related fields. \
Researchers and practitioners in {topic} continue to explore new methodologies and approaches to advance our understanding of this important area. \
Learning about {topic} builds a foundation for deeper study and informed discussion.";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("invalid config: {0}")]
  Invalid(String),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
  /// Fixed RNG seed; `None` seeds from OS entropy.
  pub seed: Option<u64>,
  pub assignment_templates: Vec<String>,
  pub question_stems: Vec<String>,
  pub topic_template: String,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      seed: None,
      assignment_templates: ASSIGNMENT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
      question_stems: QUESTION_STEMS.iter().map(|s| s.to_string()).collect(),
      topic_template: TOPIC_TEMPLATE.to_string(),
    }
  }
}

impl GeneratorConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }

  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let cfg = Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    cfg.validate()?;
    Ok(cfg)
  }

  /// Templates must carry `{topic}` and nothing else in braces; lists must not be empty.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.assignment_templates.is_empty() {
      return Err(ConfigError::Invalid("assignment_templates must not be empty".into()));
    }
    for (i, tpl) in self.assignment_templates.iter().enumerate() {
      check_topic_template(tpl).map_err(|e| ConfigError::Invalid(format!("assignment_templates[{i}]: {e}")))?;
    }
    if self.question_stems.is_empty() {
      return Err(ConfigError::Invalid("question_stems must not be empty".into()));
    }
    if let Some(i) = self.question_stems.iter().position(|s| s.trim().is_empty()) {
      return Err(ConfigError::Invalid(format!("question_stems[{i}] is blank")));
    }
    check_topic_template(&self.topic_template).map_err(|e| ConfigError::Invalid(format!("topic_template: {e}")))?;
    Ok(())
  }
}

fn check_topic_template(tpl: &str) -> Result<(), String> {
  if !tpl.contains("{topic}") {
    return Err("missing {topic} placeholder".into());
  }
  let rest = tpl.replace("{topic}", "");
  if rest.contains('{') || rest.contains('}') {
    return Err("only the {topic} placeholder is supported".into());
  }
  Ok(())
}

/// Load configuration from GENERATOR_CONFIG_PATH (if set) and apply GENERATOR_SEED.
/// On any IO/parse/validation error the built-in defaults are used.
pub fn load_generator_config_from_env() -> GeneratorConfig {
  let mut cfg = match std::env::var("GENERATOR_CONFIG_PATH") {
    Ok(path) => match GeneratorConfig::from_file(Path::new(&path)) {
      Ok(cfg) => {
        info!(target: "quizgen_backend", %path, "Loaded generator config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "quizgen_backend", %path, error = %e, "Failed to load generator config; using defaults");
        GeneratorConfig::default()
      }
    },
    Err(_) => GeneratorConfig::default(),
  };

  if let Ok(raw) = std::env::var("GENERATOR_SEED") {
    match raw.trim().parse::<u64>() {
      Ok(seed) => cfg.seed = Some(seed),
      Err(e) => warn!(target: "quizgen_backend", value = %raw, error = %e, "Ignoring invalid GENERATOR_SEED"),
    }
  }
  cfg
}
