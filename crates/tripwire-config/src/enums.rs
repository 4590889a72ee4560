use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string did not name any variant of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
  pub kind: &'static str,
  pub value: String,
}

/// Defines `as_str`, `ALL`, `Display` and `FromStr` from one wire-name table
/// so the serde names and the parser cannot drift apart.
macro_rules! wire_enum {
  ($ty:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
    impl $ty {
      pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

      pub fn as_str(self) -> &'static str {
        match self {
          $($ty::$variant => $wire),+
        }
      }
    }

    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }

    impl FromStr for $ty {
      type Err = ParseEnumError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
          $($wire => Ok($ty::$variant),)+
          _ => Err(ParseEnumError {
            kind: $kind,
            value: s.to_string(),
          }),
        }
      }
    }
  };
}

/// ERC-8004 registry a trigger listens to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Registry {
  #[default]
  Identity,
  Reputation,
  Validation,
}

wire_enum!(Registry, "registry", {
  Identity => "identity",
  Reputation => "reputation",
  Validation => "validation",
});

/// Comparison a condition applies between the event field and its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
  #[default]
  #[serde(rename = "eq")]
  Equal,
  #[serde(rename = "ne")]
  NotEqual,
  #[serde(rename = "gt")]
  GreaterThan,
  #[serde(rename = "gte")]
  GreaterThanOrEqual,
  #[serde(rename = "lt")]
  LessThan,
  #[serde(rename = "lte")]
  LessThanOrEqual,
  #[serde(rename = "in")]
  In,
  #[serde(rename = "contains")]
  Contains,
  #[serde(rename = "starts_with")]
  StartsWith,
  #[serde(rename = "ends_with")]
  EndsWith,
}

wire_enum!(Operator, "operator", {
  Equal => "eq",
  NotEqual => "ne",
  GreaterThan => "gt",
  GreaterThanOrEqual => "gte",
  LessThan => "lt",
  LessThanOrEqual => "lte",
  In => "in",
  Contains => "contains",
  StartsWith => "starts_with",
  EndsWith => "ends_with",
});

/// How an action delivers when its trigger fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
  /// Chat notification through a Telegram bot.
  #[default]
  Telegram,
  /// Outbound REST call.
  Rest,
  /// Model Context Protocol call to an agent.
  Mcp,
}

wire_enum!(ActionType, "action type", {
  Telegram => "telegram",
  Rest => "rest",
  Mcp => "mcp",
});

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_wire_names_match_serde() {
    for op in Operator::ALL {
      let json = serde_json::to_string(op).unwrap();
      assert_eq!(json, format!("\"{}\"", op.as_str()));
    }
    for registry in Registry::ALL {
      let json = serde_json::to_string(registry).unwrap();
      assert_eq!(json, format!("\"{}\"", registry.as_str()));
    }
    for action in ActionType::ALL {
      let json = serde_json::to_string(action).unwrap();
      assert_eq!(json, format!("\"{}\"", action.as_str()));
    }
  }

  #[test]
  fn test_parse_unknown_variant() {
    let err = "webhook".parse::<ActionType>().unwrap_err();
    assert_eq!(err.kind, "action type");
    assert_eq!(err.value, "webhook");
    assert_eq!(err.to_string(), "unknown action type: 'webhook'");
  }

  #[test]
  fn test_parse_round_trips_as_str() {
    assert_eq!("starts_with".parse::<Operator>(), Ok(Operator::StartsWith));
    assert_eq!("reputation".parse::<Registry>(), Ok(Registry::Reputation));
  }
}
