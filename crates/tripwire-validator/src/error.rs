use std::fmt;

use serde::Serialize;

/// One failed rule, scoped to a dotted field path such as `name`,
/// `conditions` or `actions.1.config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub path: String,
  pub message: String,
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.path, self.message)
  }
}

/// Every rule a candidate document failed.
///
/// Validation errors are data, not control flow: the form renders them next
/// to the offending input. The type still implements [`std::error::Error`]
/// so callers outside the form can propagate it with `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
  errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.errors.as_slice() {
      [] => f.write_str("no validation errors"),
      [only] => write!(f, "{}", only),
      [first, rest @ ..] => write!(f, "{} (and {} more)", first, rest.len()),
    }
  }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
    self.errors.push(FieldError {
      path: path.into(),
      message: message.into(),
    });
  }

  /// Append `other`, prefixing each of its paths with `prefix`.
  pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
    for error in other.errors {
      self.errors.push(FieldError {
        path: format!("{}.{}", prefix, error.path),
        message: error.message,
      });
    }
  }

  pub fn extend(&mut self, other: ValidationErrors) {
    self.errors.extend(other.errors);
  }

  /// Drop every error for which `keep` returns false.
  pub fn retain(&mut self, keep: impl FnMut(&FieldError) -> bool) {
    self.errors.retain(keep);
  }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
    self.errors.iter()
  }

  /// First message recorded for exactly this path.
  pub fn message_for(&self, path: &str) -> Option<&str> {
    self
      .errors
      .iter()
      .find(|e| e.path == path)
      .map(|e| e.message.as_str())
  }

  /// Whether any error sits at `path`.
  pub fn contains_path(&self, path: &str) -> bool {
    self.errors.iter().any(|e| e.path == path)
  }

  /// Whether any error sits at `path` or anywhere beneath it.
  pub fn touches(&self, path: &str) -> bool {
    self.errors.iter().any(|e| path_within(&e.path, path))
  }
}

impl<'a> IntoIterator for &'a ValidationErrors {
  type Item = &'a FieldError;
  type IntoIter = std::slice::Iter<'a, FieldError>;

  fn into_iter(self) -> Self::IntoIter {
    self.errors.iter()
  }
}

/// `conditions.0.field` is within `conditions`; `conditionsX` is not.
pub(crate) fn path_within(path: &str, root: &str) -> bool {
  path == root
    || path
      .strip_prefix(root)
      .is_some_and(|rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_merge_prefixed() {
    let mut inner = ValidationErrors::new();
    inner.push("field", "Field is required");

    let mut outer = ValidationErrors::new();
    outer.merge_prefixed("conditions.2", inner);

    assert!(outer.contains_path("conditions.2.field"));
    assert!(outer.touches("conditions"));
    assert!(!outer.contains_path("conditions"));
  }

  #[test]
  fn test_touches_respects_segment_boundaries() {
    assert!(path_within("actions.0.config", "actions"));
    assert!(path_within("actions", "actions"));
    assert!(!path_within("actionsx", "actions"));
    assert!(!path_within("name", "actions"));
  }

  #[test]
  fn test_display_summarizes() {
    let mut errors = ValidationErrors::new();
    assert_eq!(errors.to_string(), "no validation errors");

    errors.push("name", "Name is required");
    assert_eq!(errors.to_string(), "name: Name is required");

    errors.push("registry", "Invalid registry");
    assert_eq!(errors.to_string(), "name: Name is required (and 1 more)");
  }

  #[test]
  fn test_serializes_as_list() {
    let mut errors = ValidationErrors::new();
    errors.push("name", "Name is required");

    let value = serde_json::to_value(&errors).unwrap();
    assert_eq!(
      value,
      serde_json::json!([{ "path": "name", "message": "Name is required" }])
    );
  }
}
