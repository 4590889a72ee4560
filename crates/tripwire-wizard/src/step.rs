use std::fmt;

use serde::{Deserialize, Serialize};

/// Authoring phases of the trigger form, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
  Basic,
  Conditions,
  Actions,
  Review,
}

impl FormStep {
  pub const ALL: [FormStep; 4] = [
    FormStep::Basic,
    FormStep::Conditions,
    FormStep::Actions,
    FormStep::Review,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      FormStep::Basic => "basic",
      FormStep::Conditions => "conditions",
      FormStep::Actions => "actions",
      FormStep::Review => "review",
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      FormStep::Basic => "Basic Info",
      FormStep::Conditions => "Conditions",
      FormStep::Actions => "Actions",
      FormStep::Review => "Review",
    }
  }
}

impl fmt::Display for FormStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
