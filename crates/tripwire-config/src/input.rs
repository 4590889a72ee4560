//! Draft input shapes.
//!
//! Drafts are what a form holds while the user is editing. Every field
//! deserializes with a default so a half-filled document still loads, and
//! enumerated fields stay plain strings until validation parses them.

use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::trigger::{ActionRecord, ConditionRecord, ConfigMap, Trigger};

/// Chain id as supplied by a form: either a number or its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainIdInput {
  Number(i64),
  Text(String),
}

impl Default for ChainIdInput {
  fn default() -> Self {
    ChainIdInput::Number(ChainId::PRIMARY.get() as i64)
  }
}

impl From<ChainId> for ChainIdInput {
  fn from(id: ChainId) -> Self {
    ChainIdInput::Number(id.get() as i64)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerInput {
  #[serde(default)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default)]
  pub chain_id: ChainIdInput,
  #[serde(default)]
  pub registry: String,
  #[serde(default = "default_enabled")]
  pub enabled: bool,
  #[serde(default)]
  pub is_stateful: bool,
  #[serde(default)]
  pub conditions: Vec<ConditionInput>,
  #[serde(default)]
  pub actions: Vec<ActionInput>,
}

fn default_enabled() -> bool {
  true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionInput {
  #[serde(default)]
  pub condition_type: String,
  #[serde(default)]
  pub field: String,
  #[serde(default)]
  pub operator: String,
  #[serde(default)]
  pub value: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub config: Option<ConfigMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInput {
  #[serde(default)]
  pub action_type: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub priority: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub config: Option<ConfigMap>,
}

impl From<&ConditionRecord> for ConditionInput {
  fn from(record: &ConditionRecord) -> Self {
    let condition = &record.condition;
    Self {
      condition_type: condition.condition_type.clone(),
      field: condition.field.clone(),
      operator: condition.operator.as_str().to_string(),
      value: condition.value.clone(),
      config: Some(condition.config.clone()),
    }
  }
}

impl From<&ActionRecord> for ActionInput {
  fn from(record: &ActionRecord) -> Self {
    let action = &record.action;
    Self {
      action_type: action.action_type.as_str().to_string(),
      priority: Some(i64::from(action.priority)),
      config: Some(action.config.clone()),
    }
  }
}

/// Project a persisted trigger into an editable draft.
///
/// Server-only fields (ids, timestamps, execution counters) are dropped.
impl From<&Trigger> for TriggerInput {
  fn from(trigger: &Trigger) -> Self {
    Self {
      name: trigger.name.clone(),
      description: trigger.description.clone(),
      chain_id: trigger.chain_id.into(),
      registry: trigger.registry.as_str().to_string(),
      enabled: trigger.enabled,
      is_stateful: trigger.is_stateful,
      conditions: trigger.conditions.iter().map(ConditionInput::from).collect(),
      actions: trigger.actions.iter().map(ActionInput::from).collect(),
    }
  }
}
