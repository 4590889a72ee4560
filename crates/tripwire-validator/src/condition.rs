use tripwire_config::{Condition, ConditionInput, Operator};

use crate::error::ValidationErrors;
use crate::rules::{
  CONDITION_CONFIG_MAX_KEYS, CONDITION_FIELD_MAX_CHARS, CONDITION_FIELD_PATTERN,
  CONDITION_TYPE_MAX_CHARS, CONDITION_TYPE_PATTERN, CONDITION_VALUE_MAX_CHARS, char_len,
};

/// Validate a single condition.
///
/// Error paths are relative to the condition (`field`, `operator`, ...).
/// The value is trimmed and a missing config becomes an empty map.
pub fn validate_condition(input: &ConditionInput) -> Result<Condition, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let condition_type = input.condition_type.as_str();
  if condition_type.is_empty() {
    errors.push("conditionType", "Condition type is required");
  } else if char_len(condition_type) > CONDITION_TYPE_MAX_CHARS {
    errors.push(
      "conditionType",
      format!(
        "Condition type must be at most {} characters",
        CONDITION_TYPE_MAX_CHARS
      ),
    );
  } else if !CONDITION_TYPE_PATTERN.is_match(condition_type) {
    errors.push(
      "conditionType",
      "Condition type may only contain lowercase letters and underscores",
    );
  }

  let field = input.field.as_str();
  if field.is_empty() {
    errors.push("field", "Field is required");
  } else if char_len(field) > CONDITION_FIELD_MAX_CHARS {
    errors.push(
      "field",
      format!(
        "Field must be at most {} characters",
        CONDITION_FIELD_MAX_CHARS
      ),
    );
  } else if !CONDITION_FIELD_PATTERN.is_match(field) {
    errors.push(
      "field",
      "Field may only contain letters, numbers and underscores",
    );
  }

  let operator = match input.operator.parse::<Operator>() {
    Ok(op) => Some(op),
    Err(_) if input.operator.is_empty() => {
      errors.push("operator", "Operator is required");
      None
    }
    Err(e) => {
      errors.push("operator", format!("Invalid operator '{}'", e.value));
      None
    }
  };

  let value = input.value.trim();
  if char_len(value) > CONDITION_VALUE_MAX_CHARS {
    errors.push(
      "value",
      format!(
        "Value must be at most {} characters",
        CONDITION_VALUE_MAX_CHARS
      ),
    );
  }

  let config = input.config.clone().unwrap_or_default();
  if config.len() > CONDITION_CONFIG_MAX_KEYS {
    errors.push(
      "config",
      format!(
        "Condition config may have at most {} keys",
        CONDITION_CONFIG_MAX_KEYS
      ),
    );
  }

  match operator {
    Some(operator) if errors.is_empty() => Ok(Condition {
      condition_type: condition_type.to_string(),
      field: field.to_string(),
      operator,
      value: value.to_string(),
      config,
    }),
    _ => Err(errors),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn input(condition_type: &str, field: &str, operator: &str, value: &str) -> ConditionInput {
    ConditionInput {
      condition_type: condition_type.to_string(),
      field: field.to_string(),
      operator: operator.to_string(),
      value: value.to_string(),
      config: None,
    }
  }

  #[test]
  fn test_valid_condition_is_normalized() {
    let condition =
      validate_condition(&input("score_threshold", "score", "lt", "  60  ")).unwrap();

    assert_eq!(condition.operator, Operator::LessThan);
    assert_eq!(condition.value, "60");
    assert!(condition.config.is_empty());
  }

  #[test]
  fn test_missing_fields_are_reported_together() {
    let errors = validate_condition(&ConditionInput::default()).unwrap_err();

    assert_eq!(
      errors.message_for("conditionType"),
      Some("Condition type is required")
    );
    assert_eq!(errors.message_for("field"), Some("Field is required"));
    assert_eq!(errors.message_for("operator"), Some("Operator is required"));
    assert_eq!(errors.len(), 3);
  }

  #[test]
  fn test_rejects_bad_condition_type() {
    let errors = validate_condition(&input("Score-Threshold", "score", "eq", "1")).unwrap_err();
    assert!(errors.contains_path("conditionType"));

    let long = "a".repeat(CONDITION_TYPE_MAX_CHARS + 1);
    let errors = validate_condition(&input(&long, "score", "eq", "1")).unwrap_err();
    assert!(errors.contains_path("conditionType"));
  }

  #[test]
  fn test_rejects_bad_field() {
    let errors = validate_condition(&input("score_threshold", "agent.id", "eq", "1")).unwrap_err();
    assert!(errors.contains_path("field"));
  }

  #[test]
  fn test_rejects_unknown_operator() {
    let errors = validate_condition(&input("score_threshold", "score", "~=", "1")).unwrap_err();
    assert_eq!(errors.message_for("operator"), Some("Invalid operator '~='"));
  }

  #[test]
  fn test_value_length_is_checked_after_trim() {
    let padded = format!("  {}  ", "v".repeat(CONDITION_VALUE_MAX_CHARS));
    assert!(validate_condition(&input("tag_match", "tag1", "eq", &padded)).is_ok());

    let long = "v".repeat(CONDITION_VALUE_MAX_CHARS + 1);
    let errors = validate_condition(&input("tag_match", "tag1", "eq", &long)).unwrap_err();
    assert!(errors.contains_path("value"));
  }

  #[test]
  fn test_config_key_limit() {
    let mut condition = input("score_threshold", "score", "gt", "10");
    let config: serde_json::Map<_, _> = (0..=CONDITION_CONFIG_MAX_KEYS)
      .map(|i| (format!("k{}", i), json!(i)))
      .collect();
    condition.config = Some(config);

    let errors = validate_condition(&condition).unwrap_err();
    assert!(errors.contains_path("config"));
  }
}
