use std::collections::HashSet;

use tracing::debug;
use tripwire_config::{
  Action, ActionInput, ChainId, ChainIdInput, Condition, ConditionInput, Registry, TriggerDocument,
  TriggerInput,
};

use crate::action::validate_action;
use crate::condition::validate_condition;
use crate::error::ValidationErrors;
use crate::rules::{
  DESCRIPTION_MAX_CHARS, MAX_ACTIONS, MAX_CONDITIONS, MIN_ACTIONS, MIN_CONDITIONS,
  NAME_MAX_CHARS, NAME_PATTERN, char_len,
};

/// Why a supplied chain id could not be turned into a [`ChainId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainIdError {
  #[error("Chain ID must be a whole number, got '{0}'")]
  NotANumber(String),

  #[error("Unsupported chain ID: {0}")]
  Unsupported(i64),
}

/// Coerce a form-supplied chain id into a whitelisted [`ChainId`].
///
/// Text is trimmed and parsed as an integer first; the resulting number must
/// then be on the whitelist whichever form it arrived in.
pub fn coerce_chain_id(input: &ChainIdInput) -> Result<ChainId, ChainIdError> {
  let raw = match input {
    ChainIdInput::Number(n) => *n,
    ChainIdInput::Text(text) => text
      .trim()
      .parse::<i64>()
      .map_err(|_| ChainIdError::NotANumber(text.clone()))?,
  };

  u64::try_from(raw)
    .ok()
    .and_then(|id| ChainId::try_from(id).ok())
    .ok_or(ChainIdError::Unsupported(raw))
}

/// Validate a whole trigger document.
///
/// Field-level rules run on every top-level field, every condition and every
/// action, so one call reports everything that is wrong. The cross-field rule
/// (unique `conditionType:field` pairs) is reported on the `conditions` path.
pub fn validate_trigger(input: &TriggerInput) -> Result<TriggerDocument, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let name = check_name(&input.name, &mut errors);
  let description = check_description(input.description.as_deref(), &mut errors);
  let chain_id = check_chain_id(&input.chain_id, &mut errors);
  let registry = check_registry(&input.registry, &mut errors);
  let conditions = check_conditions(&input.conditions, &mut errors);
  let actions = check_actions(&input.actions, &mut errors);

  match (name, description, chain_id, registry, conditions, actions) {
    (
      Some(name),
      Some(description),
      Some(chain_id),
      Some(registry),
      Some(conditions),
      Some(actions),
    ) if errors.is_empty() => Ok(TriggerDocument {
      name,
      description,
      chain_id,
      registry,
      enabled: input.enabled,
      is_stateful: input.is_stateful,
      conditions,
      actions,
    }),
    _ => {
      debug!(error_count = errors.len(), "trigger document failed validation");
      Err(errors)
    }
  }
}

pub(crate) fn check_name(name: &str, errors: &mut ValidationErrors) -> Option<String> {
  let name = name.trim();
  if name.is_empty() {
    errors.push("name", "Name is required");
    return None;
  }
  if char_len(name) > NAME_MAX_CHARS {
    errors.push(
      "name",
      format!("Name must be at most {} characters", NAME_MAX_CHARS),
    );
    return None;
  }
  if !NAME_PATTERN.is_match(name) {
    errors.push(
      "name",
      "Name may only contain letters, numbers, spaces, hyphens, underscores and dots",
    );
    return None;
  }
  Some(name.to_string())
}

pub(crate) fn check_description(
  description: Option<&str>,
  errors: &mut ValidationErrors,
) -> Option<Option<String>> {
  let description = description.map(str::trim).filter(|d| !d.is_empty());
  match description {
    Some(d) if char_len(d) > DESCRIPTION_MAX_CHARS => {
      errors.push(
        "description",
        format!(
          "Description must be at most {} characters",
          DESCRIPTION_MAX_CHARS
        ),
      );
      None
    }
    Some(d) => Some(Some(d.to_string())),
    None => Some(None),
  }
}

pub(crate) fn check_chain_id(
  chain_id: &ChainIdInput,
  errors: &mut ValidationErrors,
) -> Option<ChainId> {
  coerce_chain_id(chain_id)
    .map_err(|e| errors.push("chainId", e.to_string()))
    .ok()
}

pub(crate) fn check_registry(registry: &str, errors: &mut ValidationErrors) -> Option<Registry> {
  if registry.is_empty() {
    errors.push("registry", "Registry is required");
    return None;
  }
  registry
    .parse::<Registry>()
    .map_err(|e| errors.push("registry", format!("Invalid registry '{}'", e.value)))
    .ok()
}

pub(crate) fn check_conditions(
  inputs: &[ConditionInput],
  errors: &mut ValidationErrors,
) -> Option<Vec<Condition>> {
  let before = errors.len();

  if inputs.len() < MIN_CONDITIONS {
    errors.push("conditions", "At least one condition is required");
  } else if inputs.len() > MAX_CONDITIONS {
    errors.push(
      "conditions",
      format!("At most {} conditions are allowed", MAX_CONDITIONS),
    );
  }

  let mut conditions = Vec::with_capacity(inputs.len());
  for (i, input) in inputs.iter().enumerate() {
    match validate_condition(input) {
      Ok(condition) => conditions.push(condition),
      Err(item_errors) => errors.merge_prefixed(&format!("conditions.{}", i), item_errors),
    }
  }

  // Uniqueness is on the (type, field) pair. The same field under another
  // type, or another field of the same type, is fine.
  let mut seen = HashSet::new();
  let mut reported = HashSet::new();
  for input in inputs {
    let key = (input.condition_type.as_str(), input.field.as_str());
    if !seen.insert(key) && reported.insert(key) {
      errors.push(
        "conditions",
        format!(
          "Duplicate condition: '{}:{}' appears more than once",
          key.0, key.1
        ),
      );
    }
  }

  (errors.len() == before).then_some(conditions)
}

pub(crate) fn check_actions(
  inputs: &[ActionInput],
  errors: &mut ValidationErrors,
) -> Option<Vec<Action>> {
  let before = errors.len();

  if inputs.len() < MIN_ACTIONS {
    errors.push("actions", "At least one action is required");
  } else if inputs.len() > MAX_ACTIONS {
    errors.push(
      "actions",
      format!("At most {} actions are allowed", MAX_ACTIONS),
    );
  }

  let mut actions = Vec::with_capacity(inputs.len());
  for (i, input) in inputs.iter().enumerate() {
    match validate_action(input) {
      Ok(action) => actions.push(action),
      Err(item_errors) => errors.merge_prefixed(&format!("actions.{}", i), item_errors),
    }
  }

  (errors.len() == before).then_some(actions)
}
