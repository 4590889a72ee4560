use std::fmt;

use tripwire_config::TriggerInput;

use crate::error::{ValidationErrors, path_within};
use crate::trigger::{
  check_actions, check_chain_id, check_conditions, check_description, check_name, check_registry,
};

/// A top-level field of a trigger document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerField {
  Name,
  Description,
  ChainId,
  Registry,
  Enabled,
  IsStateful,
  Conditions,
  Actions,
}

impl TriggerField {
  pub const ALL: &'static [TriggerField] = &[
    TriggerField::Name,
    TriggerField::Description,
    TriggerField::ChainId,
    TriggerField::Registry,
    TriggerField::Enabled,
    TriggerField::IsStateful,
    TriggerField::Conditions,
    TriggerField::Actions,
  ];

  /// Root of the error paths this field reports under.
  pub fn path(self) -> &'static str {
    match self {
      TriggerField::Name => "name",
      TriggerField::Description => "description",
      TriggerField::ChainId => "chainId",
      TriggerField::Registry => "registry",
      TriggerField::Enabled => "enabled",
      TriggerField::IsStateful => "isStateful",
      TriggerField::Conditions => "conditions",
      TriggerField::Actions => "actions",
    }
  }

  /// Whether an error path belongs to this field.
  pub fn owns(self, path: &str) -> bool {
    path_within(path, self.path())
  }
}

impl fmt::Display for TriggerField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.path())
  }
}

/// Run only the rules for `fields`, ignoring the rest of the document.
pub fn validate_fields(input: &TriggerInput, fields: &[TriggerField]) -> ValidationErrors {
  let mut errors = ValidationErrors::new();
  for field in fields {
    match field {
      TriggerField::Name => {
        check_name(&input.name, &mut errors);
      }
      TriggerField::Description => {
        check_description(input.description.as_deref(), &mut errors);
      }
      TriggerField::ChainId => {
        check_chain_id(&input.chain_id, &mut errors);
      }
      TriggerField::Registry => {
        check_registry(&input.registry, &mut errors);
      }
      // Booleans cannot be malformed once deserialized.
      TriggerField::Enabled | TriggerField::IsStateful => {}
      TriggerField::Conditions => {
        check_conditions(&input.conditions, &mut errors);
      }
      TriggerField::Actions => {
        check_actions(&input.actions, &mut errors);
      }
    }
  }
  errors
}

/// Whether the document is valid as far as `fields` are concerned.
///
/// An empty field set is always valid.
pub fn validate_partial(input: &TriggerInput, fields: &[TriggerField]) -> bool {
  validate_fields(input, fields).is_empty()
}
