//! Limits and patterns shared by the entity validators.

use std::sync::LazyLock;

use regex::Regex;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

pub const MIN_CONDITIONS: usize = 1;
pub const MAX_CONDITIONS: usize = 20;
pub const MIN_ACTIONS: usize = 1;
pub const MAX_ACTIONS: usize = 10;

pub const CONDITION_TYPE_MAX_CHARS: usize = 50;
pub const CONDITION_FIELD_MAX_CHARS: usize = 50;
pub const CONDITION_VALUE_MAX_CHARS: usize = 500;
pub const CONDITION_CONFIG_MAX_KEYS: usize = 10;

pub const ACTION_PRIORITY_MAX: i64 = 100;
pub const ACTION_CONFIG_MAX_KEYS: usize = 20;
/// Upper bound on the JSON-serialized size of an action config.
pub const ACTION_CONFIG_MAX_BYTES: usize = 10 * 1024;

/// Word characters, whitespace, hyphen, underscore and dot. Rejects markup.
pub(crate) static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Za-z0-9_\s.\-]+$").expect("trigger name pattern is a valid regex")
});

pub(crate) static CONDITION_TYPE_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-z_]+$").expect("condition type pattern is a valid regex"));

pub(crate) static CONDITION_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Za-z0-9_]+$").expect("condition field pattern is a valid regex")
});

/// Length in characters, which is what users see, not bytes.
pub(crate) fn char_len(s: &str) -> usize {
  s.chars().count()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_name_pattern() {
    assert!(NAME_PATTERN.is_match("Valid-Name_123.test"));
    assert!(NAME_PATTERN.is_match("Agent 42 feedback"));
    assert!(!NAME_PATTERN.is_match("Invalid<Script>"));
    assert!(!NAME_PATTERN.is_match("Invalid@Name"));
    assert!(!NAME_PATTERN.is_match(""));
  }

  #[test]
  fn test_condition_patterns() {
    assert!(CONDITION_TYPE_PATTERN.is_match("score_threshold"));
    assert!(!CONDITION_TYPE_PATTERN.is_match("Score"));
    assert!(!CONDITION_TYPE_PATTERN.is_match("score-threshold"));

    assert!(CONDITION_FIELD_PATTERN.is_match("agentId_2"));
    assert!(!CONDITION_FIELD_PATTERN.is_match("agent.id"));
  }

  #[test]
  fn test_char_len_counts_characters() {
    assert_eq!(char_len("héllo"), 5);
  }
}
