//! Tripwire Form
//!
//! Drives a trigger through its authoring lifecycle: default values for
//! create and edit mode, per-step validation gating for the wizard, and a
//! submit path that validates, calls the mutation client, invalidates the
//! affected cache entries and navigates to the saved trigger.

mod defaults;
mod events;
mod form;

pub use defaults::{create_defaults, default_action, edit_defaults, empty_condition};
pub use events::{
  ChannelNotifier, FIX_ERRORS_MESSAGE, FormNotice, FormNotifier, NoopNotifier, SubmitKind,
};
pub use form::{
  Collaborators, DEFAULT_ROUTE_PREFIX, FormMode, SubmitOutcome, TriggerForm, step_fields,
};
