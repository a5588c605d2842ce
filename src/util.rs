//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Title-case every word: a cased letter following another cased letter is
/// lowered, any other cased letter is raised. Uncased chars (digits, '_',
/// CJK) break words.
///
///   "photosynthesis" -> "Photosynthesis"
///   "the main_topic" -> "The Main_Topic"
pub fn title_case(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut prev_cased = false;
  for ch in s.chars() {
    if ch.is_lowercase() || ch.is_uppercase() {
      if prev_cased {
        out.extend(ch.to_lowercase());
      } else {
        out.extend(ch.to_uppercase());
      }
      prev_cased = true;
    } else {
      out.push(ch);
      prev_cased = false;
    }
  }
  out
}

/// First char upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
  text.split_whitespace().count()
}

/// Number of '.'-separated fragments that are not blank.
pub fn sentence_count(text: &str) -> usize {
  text.split('.').filter(|s| !s.trim().is_empty()).count()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}
