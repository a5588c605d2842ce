//! Key-concept extraction.
//!
//! A purely syntactic heuristic:
//!   1. punctuation is replaced by spaces and the text is split on whitespace,
//!   2. capitalized tokens (first char upper, rest lower, > 3 chars) are taken,
//!   3. alphabetic words longer than 4 chars that occur more than once are
//!      appended, most frequent first,
//!   4. the union is deduplicated (first occurrence wins) and cut to 8.
//!
//! Sentence-initial words ("The", "This") pass step 2 as well. No stopword
//! filtering is applied.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::util::capitalize;

/// Upper bound on the number of concepts returned.
pub const MAX_CONCEPTS: usize = 8;
/// How many of the most frequent words are considered.
const TOP_FREQUENT: usize = 10;
/// Capitalized tokens must be longer than this (in chars).
const MIN_CAPITALIZED_LEN: usize = 3;
/// Frequency-counted words must be longer than this (in chars).
const MIN_FREQUENT_LEN: usize = 4;

static NON_WORD: Lazy<Regex> = Lazy::new(|| {
  // Unicode-aware: \w covers letters, digits, marks and '_'.
  Regex::new(r"[^\w\s]").expect("static regex is valid")
});

/// Replace every char that is neither a word char nor whitespace with a space.
pub fn normalize(text: &str) -> String {
  NON_WORD.replace_all(text, " ").into_owned()
}

/// Extract up to [`MAX_CONCEPTS`] lowercase concept strings from `text`.
#[instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn extract_key_concepts(text: &str) -> Vec<String> {
  let normalized = normalize(text);
  let words: Vec<&str> = normalized.split_whitespace().collect();

  let mut candidates: Vec<String> = capitalized_tokens(&words);
  let capitalized = candidates.len();
  candidates.extend(frequent_words(&words));

  let concepts = dedup_truncate(candidates, MAX_CONCEPTS);
  debug!(
    target: "quizgen",
    tokens = words.len(),
    capitalized,
    concepts = concepts.len(),
    "Concepts extracted"
  );
  concepts
}

fn capitalized_tokens(words: &[&str]) -> Vec<String> {
  words
    .iter()
    .filter(|w| w.chars().count() > MIN_CAPITALIZED_LEN && capitalize(w) == **w)
    .map(|w| w.to_lowercase())
    .collect()
}

/// Words seen more than once among the top [`TOP_FREQUENT`] by count.
/// Ties keep first-occurrence order.
fn frequent_words(words: &[&str]) -> Vec<String> {
  let mut counts: HashMap<String, usize> = HashMap::new();
  let mut order: Vec<String> = Vec::new();

  for w in words {
    let clean = w.to_lowercase();
    if clean.chars().count() <= MIN_FREQUENT_LEN || !clean.chars().all(char::is_alphabetic) {
      continue;
    }
    let count = counts.entry(clean.clone()).or_insert(0);
    if *count == 0 {
      order.push(clean);
    }
    *count += 1;
  }

  let mut ranked: Vec<(String, usize)> = order
    .into_iter()
    .map(|w| {
      let c = counts.get(&w).copied().unwrap_or(0);
      (w, c)
    })
    .collect();
  // sort_by is stable, so equal counts stay in first-seen order.
  ranked.sort_by(|a, b| b.1.cmp(&a.1));

  ranked
    .into_iter()
    .take(TOP_FREQUENT)
    .filter(|(_, c)| *c > 1)
    .map(|(w, _)| w)
    .collect()
}

fn dedup_truncate(candidates: Vec<String>, max: usize) -> Vec<String> {
  let mut seen = HashSet::new();
  candidates
    .into_iter()
    .filter(|c| seen.insert(c.clone()))
    .take(max)
    .collect()
}
