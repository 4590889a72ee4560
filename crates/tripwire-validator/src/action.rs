use tripwire_config::{Action, ActionInput, ActionType, ConfigMap};

use crate::error::ValidationErrors;
use crate::rules::{ACTION_CONFIG_MAX_BYTES, ACTION_CONFIG_MAX_KEYS, ACTION_PRIORITY_MAX};

/// Validate a single action.
///
/// Priority defaults to 0. The config is bounded both by key count and by
/// its serialized size, so a handful of huge values cannot slip through.
pub fn validate_action(input: &ActionInput) -> Result<Action, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let action_type = match input.action_type.parse::<ActionType>() {
    Ok(action_type) => Some(action_type),
    Err(_) if input.action_type.is_empty() => {
      errors.push("actionType", "Action type is required");
      None
    }
    Err(e) => {
      errors.push("actionType", format!("Invalid action type '{}'", e.value));
      None
    }
  };

  let priority = input.priority.unwrap_or(0);
  if !(0..=ACTION_PRIORITY_MAX).contains(&priority) {
    errors.push(
      "priority",
      format!("Priority must be between 0 and {}", ACTION_PRIORITY_MAX),
    );
  }

  let config = input.config.clone().unwrap_or_default();
  if config.len() > ACTION_CONFIG_MAX_KEYS {
    errors.push(
      "config",
      format!(
        "Action config may have at most {} keys",
        ACTION_CONFIG_MAX_KEYS
      ),
    );
  } else if config_size(&config) > ACTION_CONFIG_MAX_BYTES {
    errors.push(
      "config",
      format!(
        "Action config must be at most {} KB when serialized",
        ACTION_CONFIG_MAX_BYTES / 1024
      ),
    );
  }

  match (action_type, u8::try_from(priority)) {
    (Some(action_type), Ok(priority)) if errors.is_empty() => Ok(Action {
      action_type,
      priority,
      config,
    }),
    _ => Err(errors),
  }
}

/// Serialized JSON size of a config in bytes.
pub fn config_size(config: &ConfigMap) -> usize {
  // Serializing a map of JSON values cannot fail.
  serde_json::to_vec(config).map(|v| v.len()).unwrap_or(usize::MAX)
}
