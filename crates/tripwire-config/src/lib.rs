//! Tripwire Config
//!
//! This crate contains the serializable trigger rule types for Tripwire.
//! A trigger watches one ERC-8004 registry on one chain and fires its
//! actions when all of its conditions match an incoming event.
//!
//! Types come in three shapes:
//! - Draft inputs ([`TriggerInput`], [`ConditionInput`], [`ActionInput`]) hold
//!   whatever the user has typed so far, including invalid values.
//! - Validated documents ([`TriggerDocument`], [`Condition`], [`Action`]) are
//!   only produced by `tripwire-validator` and are what gets sent to the API.
//! - Records ([`Trigger`], [`ConditionRecord`], [`ActionRecord`]) are what the
//!   API returns, including server-assigned fields.
//!
//! All shapes use camelCase field names on the wire.

mod chain;
mod enums;
mod input;
mod trigger;

pub use chain::{ChainId, SUPPORTED_CHAINS, SupportedChain, UnsupportedChain};
pub use enums::{ActionType, Operator, ParseEnumError, Registry};
pub use input::{ActionInput, ChainIdInput, ConditionInput, TriggerInput};
pub use trigger::{
  Action, ActionRecord, Condition, ConditionRecord, ConfigMap, Trigger, TriggerDocument,
};
