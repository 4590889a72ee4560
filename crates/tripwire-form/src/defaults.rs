//! Initial form values for each lifecycle mode.

use tripwire_config::{
  ActionInput, ActionType, ChainIdInput, ConditionInput, ConfigMap, Operator, Registry, Trigger,
  TriggerInput,
};

/// A blank condition row. Left invalid on purpose so the conditions step
/// cannot be passed until the user fills it in.
pub fn empty_condition() -> ConditionInput {
  ConditionInput {
    operator: Operator::default().as_str().to_string(),
    ..ConditionInput::default()
  }
}

/// A chat notification at priority 0.
pub fn default_action() -> ActionInput {
  ActionInput {
    action_type: ActionType::Telegram.as_str().to_string(),
    priority: Some(0),
    config: Some(ConfigMap::new()),
  }
}

/// Values for a brand new trigger.
pub fn create_defaults() -> TriggerInput {
  TriggerInput {
    name: String::new(),
    description: None,
    chain_id: ChainIdInput::default(),
    registry: Registry::default().as_str().to_string(),
    enabled: true,
    is_stateful: false,
    conditions: vec![empty_condition()],
    actions: vec![default_action()],
  }
}

/// Values for editing `trigger`, without any server-only fields.
pub fn edit_defaults(trigger: &Trigger) -> TriggerInput {
  TriggerInput::from(trigger)
}
