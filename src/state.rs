//! Application state: the generation pipeline, topic boilerplate and the shared RNG.
//!
//! Everything here is immutable after startup except the RNG, which sits
//! behind an async mutex and is only held for the synchronous pipeline run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::assignments::AssignmentGenerator;
use crate::config::{load_generator_config_from_env, GeneratorConfig};
use crate::logic::Pipeline;
use crate::quiz::QuizGenerator;

pub struct AppState {
    pub pipeline: Pipeline,
    pub topic_template: String,
    pub rng: Mutex<StdRng>,
}

impl AppState {
    /// Build state from env: load config (or defaults) and seed the RNG.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_config(load_generator_config_from_env())
    }

    /// Build state from an already validated config.
    pub fn from_config(cfg: GeneratorConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => {
                info!(target: "quizgen_backend", seed, "Using fixed RNG seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        info!(
            target: "quizgen_backend",
            assignment_templates = cfg.assignment_templates.len(),
            question_stems = cfg.question_stems.len(),
            "Generator ready"
        );

        Self {
            pipeline: Pipeline {
                assignments: AssignmentGenerator::new(cfg.assignment_templates),
                quiz: QuizGenerator::new(cfg.question_stems),
            },
            topic_template: cfg.topic_template,
            rng: Mutex::new(rng),
        }
    }
}
