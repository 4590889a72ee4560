//! Tripwire Validator
//!
//! Pure, synchronous validation of trigger drafts into
//! [`tripwire_config::TriggerDocument`] values.
//!
//! Every validator returns `Result<T, ValidationErrors>`. Failures are
//! collected rather than short-circuited so a form can show every problem at
//! once, each scoped to a dotted field path:
//!
//! - `name`, `chainId`, `registry`, ... for top-level fields
//! - `conditions.2.field`, `actions.0.priority`, ... for list items
//! - `conditions` / `actions` for list-level rules (size, duplicates)
//!
//! [`validate_partial`] checks a subset of top-level fields so that a wizard
//! can gate one step without the rest of the document being complete.

mod action;
mod condition;
mod error;
mod partial;
pub mod rules;
mod trigger;

pub use action::{config_size, validate_action};
pub use condition::validate_condition;
pub use error::{FieldError, ValidationErrors};
pub use partial::{TriggerField, validate_fields, validate_partial};
pub use trigger::{ChainIdError, coerce_chain_id, validate_trigger};
