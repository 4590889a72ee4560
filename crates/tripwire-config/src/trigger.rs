use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chain::ChainId;
use crate::enums::{ActionType, Operator, Registry};

/// Open key/value parameters attached to a condition or action.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// A validated predicate clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
  pub condition_type: String,
  pub field: String,
  pub operator: Operator,
  pub value: String,
  #[serde(default)]
  pub config: ConfigMap,
}

/// A validated delivery clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
  pub action_type: ActionType,
  /// Always within 0..=100.
  #[serde(default)]
  pub priority: u8,
  #[serde(default)]
  pub config: ConfigMap,
}

/// A fully validated trigger, ready to send to the create or update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDocument {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub chain_id: ChainId,
  pub registry: Registry,
  pub enabled: bool,
  pub is_stateful: bool,
  pub conditions: Vec<Condition>,
  pub actions: Vec<Action>,
}

/// A condition as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
  pub id: i64,
  #[serde(flatten)]
  pub condition: Condition,
  pub created_at: DateTime<Utc>,
}

/// An action as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
  pub id: i64,
  #[serde(flatten)]
  pub action: Action,
  pub created_at: DateTime<Utc>,
}

/// A persisted trigger as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
  pub id: Uuid,
  pub organization_id: Uuid,
  pub user_id: Uuid,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub chain_id: ChainId,
  pub registry: Registry,
  pub enabled: bool,
  #[serde(default)]
  pub is_stateful: bool,
  #[serde(default)]
  pub execution_count: u64,
  #[serde(default)]
  pub last_executed_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  #[serde(default)]
  pub conditions: Vec<ConditionRecord>,
  #[serde(default)]
  pub actions: Vec<ActionRecord>,
}
