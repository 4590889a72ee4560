//! User-facing notices and notifiers.
//!
//! The form reports what happened through [`SubmitOutcome`](crate::SubmitOutcome)
//! return values; notices are the side channel a UI turns into toasts.

use serde::Serialize;
use tokio::sync::mpsc;
use tripwire_wizard::FormStep;
use uuid::Uuid;

/// Shown when a step or the final submission fails validation.
pub const FIX_ERRORS_MESSAGE: &str = "Please fix the errors before continuing";

/// Which mutation a submission performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
  Create,
  Update,
}

/// Notices emitted by the trigger form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FormNotice {
  /// The current step failed validation and the wizard did not advance.
  StepBlocked { step: FormStep, message: String },

  /// The final submission failed validation and never reached the network.
  SubmitBlocked { error_count: usize, message: String },

  /// The trigger was saved.
  Submitted { trigger_id: Uuid, kind: SubmitKind },

  /// The mutation call failed; the form keeps its values for a retry.
  SubmitFailed { message: String },
}

/// Trait for receiving form notices.
pub trait FormNotifier: Send + Sync {
  fn notify(&self, notice: FormNotice);
}

/// Discards all notices.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl FormNotifier for NoopNotifier {
  fn notify(&self, _notice: FormNotice) {}
}

/// Sends notices to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<FormNotice>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<FormNotice>) -> Self {
    Self { sender }
  }
}

impl FormNotifier for ChannelNotifier {
  fn notify(&self, notice: FormNotice) {
    // Ignore send errors - receiver may have been dropped
    let _ = self.sender.send(notice);
  }
}
