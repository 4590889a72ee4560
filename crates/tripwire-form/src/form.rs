//! The trigger form orchestrator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, instrument, warn};
use tripwire_client::{CacheInvalidator, CacheKey, MutationClient, Navigator, trigger_route};
use tripwire_config::{Trigger, TriggerInput};
use tripwire_validator::{TriggerField, ValidationErrors, validate_fields, validate_trigger};
use tripwire_wizard::{FormStep, StepNavigator};
use uuid::Uuid;

use crate::defaults::{create_defaults, default_action, edit_defaults, empty_condition};
use crate::events::{FIX_ERRORS_MESSAGE, FormNotice, FormNotifier, NoopNotifier, SubmitKind};

/// Route prefix for trigger detail views.
pub const DEFAULT_ROUTE_PREFIX: &str = "/dashboard/triggers";

/// Top-level fields each wizard step is responsible for.
///
/// The review step owns nothing: it exists to inspect the assembled
/// document, not to re-validate it.
pub fn step_fields(step: FormStep) -> &'static [TriggerField] {
  match step {
    FormStep::Basic => &[
      TriggerField::Name,
      TriggerField::ChainId,
      TriggerField::Registry,
    ],
    FormStep::Conditions => &[TriggerField::Conditions],
    FormStep::Actions => &[TriggerField::Actions],
    FormStep::Review => &[],
  }
}

/// Services the form hands a valid document to.
#[derive(Clone)]
pub struct Collaborators {
  pub client: Arc<dyn MutationClient>,
  pub cache: Arc<dyn CacheInvalidator>,
  pub navigator: Arc<dyn Navigator>,
}

/// Whether the form authors a new trigger or edits an existing one.
#[derive(Debug, Clone)]
pub enum FormMode {
  Create { organization_id: Uuid },
  Edit { trigger: Box<Trigger> },
}

impl FormMode {
  pub fn kind(&self) -> SubmitKind {
    match self {
      FormMode::Create { .. } => SubmitKind::Create,
      FormMode::Edit { .. } => SubmitKind::Update,
    }
  }
}

/// Result of one submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
  /// The document failed validation; nothing was sent.
  Invalid(ValidationErrors),
  /// Another submission is still in flight; nothing was sent.
  Busy,
  /// The trigger was saved and the user was sent to `route`.
  Saved { trigger: Trigger, route: String },
  /// The mutation call failed with a user-facing message.
  Failed { message: String },
}

/// Clears the in-flight flag when the mutation call ends, including when the
/// submit future is dropped mid-request.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
  fn begin(flag: &'a AtomicBool) -> Option<Self> {
    flag
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| InFlight(flag))
  }
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

/// Binds draft values, step navigation, validation and the submit lifecycle.
///
/// Generic over `N: FormNotifier` like the rest of the notice plumbing: use
/// [`TriggerForm::create`] / [`TriggerForm::edit`] for a form that discards
/// notices, then [`TriggerForm::with_notifier`] to observe them.
pub struct TriggerForm<N: FormNotifier = NoopNotifier> {
  mode: FormMode,
  values: TriggerInput,
  errors: ValidationErrors,
  steps: StepNavigator<FormStep>,
  collaborators: Collaborators,
  notifier: N,
  route_prefix: String,
  submitting: AtomicBool,
  submit_error: Mutex<Option<String>>,
}

impl TriggerForm<NoopNotifier> {
  /// A form for a new trigger owned by `organization_id`.
  pub fn create(organization_id: Uuid, collaborators: Collaborators) -> Self {
    Self::with_mode(FormMode::Create { organization_id }, collaborators)
  }

  /// A form pre-filled from an existing trigger.
  pub fn edit(trigger: Trigger, collaborators: Collaborators) -> Self {
    Self::with_mode(
      FormMode::Edit {
        trigger: Box::new(trigger),
      },
      collaborators,
    )
  }

  fn with_mode(mode: FormMode, collaborators: Collaborators) -> Self {
    let values = match &mode {
      FormMode::Create { .. } => create_defaults(),
      FormMode::Edit { trigger } => edit_defaults(trigger),
    };

    Self {
      mode,
      values,
      errors: ValidationErrors::new(),
      steps: StepNavigator::trigger_form(),
      collaborators,
      notifier: NoopNotifier,
      route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
      submitting: AtomicBool::new(false),
      submit_error: Mutex::new(None),
    }
  }
}

impl<N: FormNotifier> TriggerForm<N> {
  /// Replace the notifier.
  pub fn with_notifier<M: FormNotifier>(self, notifier: M) -> TriggerForm<M> {
    TriggerForm {
      mode: self.mode,
      values: self.values,
      errors: self.errors,
      steps: self.steps,
      collaborators: self.collaborators,
      notifier,
      route_prefix: self.route_prefix,
      submitting: self.submitting,
      submit_error: self.submit_error,
    }
  }

  /// Set the route prefix used for the post-save detail view.
  pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.route_prefix = prefix.into();
    self
  }

  pub fn mode(&self) -> &FormMode {
    &self.mode
  }

  pub fn values(&self) -> &TriggerInput {
    &self.values
  }

  pub fn values_mut(&mut self) -> &mut TriggerInput {
    &mut self.values
  }

  pub fn set_values(&mut self, values: TriggerInput) {
    self.values = values;
  }

  /// Per-field errors from the last step validation or submission.
  pub fn errors(&self) -> &ValidationErrors {
    &self.errors
  }

  pub fn add_condition(&mut self) {
    self.values.conditions.push(empty_condition());
  }

  pub fn remove_condition(&mut self, index: usize) {
    if index < self.values.conditions.len() {
      self.values.conditions.remove(index);
    }
  }

  pub fn add_action(&mut self) {
    self.values.actions.push(default_action());
  }

  pub fn remove_action(&mut self, index: usize) {
    if index < self.values.actions.len() {
      self.values.actions.remove(index);
    }
  }

  pub fn steps(&self) -> &StepNavigator<FormStep> {
    &self.steps
  }

  pub fn current_step(&self) -> FormStep {
    self.steps.current_step()
  }

  /// Validate the fields `step` owns and record their errors.
  ///
  /// Errors for other steps' fields are left untouched.
  pub fn validate_step(&mut self, step: FormStep) -> bool {
    let fields = step_fields(step);
    let step_errors = validate_fields(&self.values, fields);
    let valid = step_errors.is_empty();

    self
      .errors
      .retain(|e| !fields.iter().any(|field| field.owns(&e.path)));
    self.errors.extend(step_errors);

    debug!(step = %step, valid, "validated wizard step");
    valid
  }

  /// Advance if the current step is valid.
  ///
  /// Returns whether the step passed validation. On failure a single
  /// [`FormNotice::StepBlocked`] is emitted and the step does not change.
  pub fn go_to_next_step(&mut self) -> bool {
    let step = self.steps.current_step();
    if !self.validate_step(step) {
      self.notifier.notify(FormNotice::StepBlocked {
        step,
        message: FIX_ERRORS_MESSAGE.to_string(),
      });
      return false;
    }
    self.steps.next();
    true
  }

  pub fn go_to_previous_step(&mut self) {
    self.steps.previous();
  }

  /// Jump without validating. Steps outside the wizard are ignored.
  pub fn go_to_step(&mut self, step: FormStep) {
    self.steps.go_to(step);
  }

  /// True exactly while a create or update call is in flight.
  pub fn is_submitting(&self) -> bool {
    self.submitting.load(Ordering::Acquire)
  }

  /// Message from the last failed mutation, cleared when a new one starts.
  pub fn submit_error(&self) -> Option<String> {
    self
      .submit_error
      .lock()
      .unwrap_or_else(|e| e.into_inner())
      .clone()
  }

  /// Submit the form's own values.
  ///
  /// Validation errors replace the recorded ones; once the document passes
  /// validation the recorded errors are cleared.
  pub async fn submit(&mut self) -> SubmitOutcome {
    let outcome = self.on_submit(self.values.clone()).await;
    match &outcome {
      SubmitOutcome::Invalid(errors) => self.errors = errors.clone(),
      SubmitOutcome::Busy => {}
      SubmitOutcome::Saved { .. } | SubmitOutcome::Failed { .. } => {
        self.errors = ValidationErrors::new();
      }
    }
    outcome
  }

  /// Validate `document`, send it, then invalidate and navigate on success.
  ///
  /// Validation failures never reach the client. Client failures are turned
  /// into a user-facing message; the form's values are not touched either
  /// way, so the user can fix things and retry.
  #[instrument(name = "trigger_submit", skip(self, document), fields(kind = ?self.mode.kind()))]
  pub async fn on_submit(&self, document: TriggerInput) -> SubmitOutcome {
    if self.is_submitting() {
      warn!("submission already in flight");
      return SubmitOutcome::Busy;
    }

    let document = match validate_trigger(&document) {
      Ok(document) => document,
      Err(errors) => {
        debug!(error_count = errors.len(), "submission blocked by validation");
        self.notifier.notify(FormNotice::SubmitBlocked {
          error_count: errors.len(),
          message: FIX_ERRORS_MESSAGE.to_string(),
        });
        return SubmitOutcome::Invalid(errors);
      }
    };

    let result = {
      let Some(_in_flight) = InFlight::begin(&self.submitting) else {
        warn!("submission already in flight");
        return SubmitOutcome::Busy;
      };
      self.set_submit_error(None);

      let client = &self.collaborators.client;
      match &self.mode {
        FormMode::Create { organization_id } => client.create(*organization_id, &document).await,
        FormMode::Edit { trigger } => client.update(trigger.id, &document).await,
      }
    };

    match result {
      Ok(saved) => {
        let trigger_id = match &self.mode {
          FormMode::Create { .. } => saved.id,
          FormMode::Edit { trigger } => trigger.id,
        };

        self
          .collaborators
          .cache
          .invalidate(&self.invalidation_keys(trigger_id));

        let route = trigger_route(&self.route_prefix, trigger_id);
        self.collaborators.navigator.navigate(&route);

        info!(trigger_id = %trigger_id, route = %route, "trigger saved");
        self.notifier.notify(FormNotice::Submitted {
          trigger_id,
          kind: self.mode.kind(),
        });
        SubmitOutcome::Saved {
          trigger: saved,
          route,
        }
      }
      Err(e) => {
        let message = e.user_message();
        error!(error = %e, "trigger submission failed");
        self.set_submit_error(Some(message.clone()));
        self.notifier.notify(FormNotice::SubmitFailed {
          message: message.clone(),
        });
        SubmitOutcome::Failed { message }
      }
    }
  }

  fn invalidation_keys(&self, trigger_id: Uuid) -> Vec<CacheKey> {
    match &self.mode {
      FormMode::Create { organization_id } => vec![CacheKey::TriggerList {
        organization_id: *organization_id,
      }],
      FormMode::Edit { trigger } => vec![
        CacheKey::TriggerList {
          organization_id: trigger.organization_id,
        },
        CacheKey::TriggerDetail { trigger_id },
      ],
    }
  }

  fn set_submit_error(&self, message: Option<String>) {
    *self.submit_error.lock().unwrap_or_else(|e| e.into_inner()) = message;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use tripwire_client::ClientError;
  use tripwire_config::{ChainIdInput, ConditionInput, TriggerDocument};

  /// Step tests never submit, so none of these are reached.
  struct Unreachable;

  #[async_trait]
  impl MutationClient for Unreachable {
    async fn create(&self, _: Uuid, _: &TriggerDocument) -> Result<Trigger, ClientError> {
      unreachable!("step tests never submit")
    }

    async fn update(&self, _: Uuid, _: &TriggerDocument) -> Result<Trigger, ClientError> {
      unreachable!("step tests never submit")
    }
  }

  impl CacheInvalidator for Unreachable {
    fn invalidate(&self, _: &[CacheKey]) {}
  }

  impl Navigator for Unreachable {
    fn navigate(&self, _: &str) {}
  }

  fn collaborators() -> Collaborators {
    let unreachable = Arc::new(Unreachable);
    Collaborators {
      client: unreachable.clone(),
      cache: unreachable.clone(),
      navigator: unreachable,
    }
  }

  fn form() -> TriggerForm {
    TriggerForm::create(Uuid::new_v4(), collaborators())
  }

  fn fill_basic(form: &mut TriggerForm) {
    let values = form.values_mut();
    values.name = "Reputation drop".to_string();
    values.chain_id = ChainIdInput::Text("84532".to_string());
    values.registry = "reputation".to_string();
  }

  fn fill_condition(form: &mut TriggerForm) {
    form.values_mut().conditions[0] = ConditionInput {
      condition_type: "score_threshold".to_string(),
      field: "score".to_string(),
      operator: "lt".to_string(),
      value: "50".to_string(),
      config: None,
    };
  }

  #[test]
  fn test_step_fields() {
    assert_eq!(
      step_fields(FormStep::Basic),
      &[
        TriggerField::Name,
        TriggerField::ChainId,
        TriggerField::Registry
      ]
    );
    assert_eq!(step_fields(FormStep::Conditions), &[TriggerField::Conditions]);
    assert_eq!(step_fields(FormStep::Actions), &[TriggerField::Actions]);
    assert!(step_fields(FormStep::Review).is_empty());
  }

  #[test]
  fn test_blank_basic_step_blocks() {
    let mut form = form();

    assert!(!form.go_to_next_step());
    assert_eq!(form.current_step(), FormStep::Basic);
    assert_eq!(form.errors().message_for("name"), Some("Name is required"));
  }

  #[test]
  fn test_walk_through_wizard() {
    let mut form = form();
    fill_basic(&mut form);

    assert!(form.go_to_next_step());
    assert_eq!(form.current_step(), FormStep::Conditions);

    // The stub condition is empty.
    assert!(!form.go_to_next_step());
    assert!(form.errors().touches("conditions"));

    fill_condition(&mut form);
    assert!(form.go_to_next_step());
    assert!(!form.errors().touches("conditions"));
    assert_eq!(form.current_step(), FormStep::Actions);

    assert!(form.go_to_next_step());
    assert_eq!(form.current_step(), FormStep::Review);
    assert_eq!(form.steps().progress(), 100.0);

    // Review always passes and is terminal.
    assert!(form.go_to_next_step());
    assert_eq!(form.current_step(), FormStep::Review);
  }

  #[test]
  fn test_step_validation_only_replaces_its_own_errors() {
    let mut form = form();
    assert!(!form.validate_step(FormStep::Basic));
    assert!(!form.validate_step(FormStep::Conditions));
    assert!(form.errors().touches("name"));

    fill_basic(&mut form);
    assert!(form.validate_step(FormStep::Basic));
    assert!(!form.errors().touches("name"));
    assert!(form.errors().touches("conditions"));
  }

  #[test]
  fn test_review_step_passes_with_invalid_document() {
    let mut form = form();
    assert!(form.validate_step(FormStep::Review));
  }

  #[test]
  fn test_go_to_step_does_not_validate() {
    let mut form = form();
    form.go_to_step(FormStep::Actions);
    assert_eq!(form.current_step(), FormStep::Actions);

    form.go_to_previous_step();
    assert_eq!(form.current_step(), FormStep::Conditions);
  }

  #[test]
  fn test_add_and_remove_rows() {
    let mut form = form();
    form.add_condition();
    form.add_action();
    assert_eq!(form.values().conditions.len(), 2);
    assert_eq!(form.values().actions.len(), 2);

    form.remove_condition(0);
    form.remove_action(5);
    assert_eq!(form.values().conditions.len(), 1);
    assert_eq!(form.values().actions.len(), 2);
  }

  #[test]
  fn test_not_submitting_initially() {
    let form = form();
    assert!(!form.is_submitting());
    assert_eq!(form.submit_error(), None);
  }

  #[test]
  fn test_in_flight_guard() {
    let flag = AtomicBool::new(false);
    {
      let _first = InFlight::begin(&flag).unwrap();
      assert!(flag.load(Ordering::Acquire));
      assert!(InFlight::begin(&flag).is_none());
    }
    assert!(!flag.load(Ordering::Acquire));
  }
}
