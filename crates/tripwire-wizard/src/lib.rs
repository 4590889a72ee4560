//! Tripwire Wizard
//!
//! A minimal finite-state controller over an ordered list of steps, plus the
//! step alphabet the trigger form uses. The navigator never validates: gating
//! a transition on form validity is the caller's job.

mod navigator;
mod step;

pub use navigator::{StepNavigator, WizardError};
pub use step::FormStep;
