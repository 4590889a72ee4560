use std::fmt::Debug;

use thiserror::Error;
use tracing::debug;

use crate::step::FormStep;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
  /// A navigator needs at least one step to sit on.
  #[error("a wizard needs at least one step")]
  NoSteps,

  /// The same step identifier appears twice.
  #[error("duplicate step in wizard: {0}")]
  DuplicateStep(String),
}

/// Finite-state controller over an ordered, caller-supplied list of steps.
///
/// Transitions are synchronous and never fail: moving past either end, or
/// jumping to a step that is not in the list, leaves the state unchanged.
#[derive(Debug, Clone)]
pub struct StepNavigator<S> {
  steps: Vec<S>,
  current: usize,
}

impl<S: Copy + PartialEq + Debug> StepNavigator<S> {
  /// Start on the first step.
  pub fn new(steps: impl Into<Vec<S>>) -> Result<Self, WizardError> {
    let steps = steps.into();
    if steps.is_empty() {
      return Err(WizardError::NoSteps);
    }
    for (i, step) in steps.iter().enumerate() {
      if steps[..i].contains(step) {
        return Err(WizardError::DuplicateStep(format!("{:?}", step)));
      }
    }
    Ok(Self { steps, current: 0 })
  }

  /// Start on `initial`, or on the first step if `initial` is not listed.
  pub fn with_initial(steps: impl Into<Vec<S>>, initial: S) -> Result<Self, WizardError> {
    let mut navigator = Self::new(steps)?;
    navigator.go_to(initial);
    Ok(navigator)
  }

  pub fn current_step(&self) -> S {
    self.steps[self.current]
  }

  pub fn current_index(&self) -> usize {
    self.current
  }

  pub fn steps(&self) -> &[S] {
    &self.steps
  }

  pub fn step_count(&self) -> usize {
    self.steps.len()
  }

  pub fn is_first(&self) -> bool {
    self.current == 0
  }

  pub fn is_last(&self) -> bool {
    self.current + 1 == self.steps.len()
  }

  /// Percentage through the wizard, counting the current step as done.
  ///
  /// A four step wizard reports 25, 50, 75 and 100; never 0.
  pub fn progress(&self) -> f64 {
    (self.current + 1) as f64 / self.steps.len() as f64 * 100.0
  }

  /// Advance one step. No-op on the last step.
  pub fn next(&mut self) {
    if !self.is_last() {
      self.current += 1;
      debug!(step = ?self.current_step(), "wizard advanced");
    }
  }

  /// Go back one step. No-op on the first step.
  pub fn previous(&mut self) {
    if !self.is_first() {
      self.current -= 1;
      debug!(step = ?self.current_step(), "wizard went back");
    }
  }

  /// Jump to `step` if it is one of the configured steps.
  ///
  /// Unknown steps are ignored rather than rejected so stale UI shortcuts
  /// cannot break navigation. Callers that need strictness should check
  /// [`StepNavigator::contains`] first.
  pub fn go_to(&mut self, step: S) {
    match self.steps.iter().position(|s| *s == step) {
      Some(index) => {
        self.current = index;
        debug!(step = ?step, "wizard jumped");
      }
      None => debug!(step = ?step, "ignoring jump to unknown wizard step"),
    }
  }

  pub fn contains(&self, step: S) -> bool {
    self.steps.contains(&step)
  }
}

impl StepNavigator<FormStep> {
  /// The trigger form wizard: basic, conditions, actions, review.
  pub fn trigger_form() -> Self {
    Self {
      steps: FormStep::ALL.to_vec(),
      current: 0,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn wizard() -> StepNavigator<FormStep> {
    StepNavigator::trigger_form()
  }

  #[test]
  fn test_starts_on_first_step() {
    let nav = wizard();
    assert_eq!(nav.current_step(), FormStep::Basic);
    assert!(nav.is_first());
    assert!(!nav.is_last());
  }

  #[test]
  fn test_progress_for_four_steps() {
    let mut nav = wizard();
    let mut seen = vec![nav.progress()];
    for _ in 1..nav.step_count() {
      nav.next();
      seen.push(nav.progress());
    }
    assert_eq!(seen, vec![25.0, 50.0, 75.0, 100.0]);
  }

  #[test]
  fn test_next_stops_at_last() {
    let mut nav = wizard();
    nav.go_to(FormStep::Review);
    assert!(nav.is_last());

    nav.next();
    assert_eq!(nav.current_step(), FormStep::Review);
    assert_eq!(nav.progress(), 100.0);
  }

  #[test]
  fn test_previous_stops_at_first() {
    let mut nav = wizard();
    nav.previous();
    assert_eq!(nav.current_step(), FormStep::Basic);

    nav.next();
    nav.next();
    nav.previous();
    assert_eq!(nav.current_step(), FormStep::Conditions);
  }

  #[test]
  fn test_go_to_unknown_step_is_ignored() {
    let mut nav = StepNavigator::new([FormStep::Basic, FormStep::Review]).unwrap();
    nav.go_to(FormStep::Actions);
    assert_eq!(nav.current_step(), FormStep::Basic);
    assert!(!nav.contains(FormStep::Actions));

    nav.go_to(FormStep::Review);
    assert_eq!(nav.current_step(), FormStep::Review);
  }

  #[test]
  fn test_trigger_form_matches_checked_constructor() {
    let checked = StepNavigator::new(FormStep::ALL).unwrap();
    assert_eq!(StepNavigator::trigger_form().steps(), checked.steps());
  }

  #[test]
  fn test_with_initial() {
    let nav = StepNavigator::with_initial(FormStep::ALL, FormStep::Actions).unwrap();
    assert_eq!(nav.current_index(), 2);

    let nav = StepNavigator::with_initial([FormStep::Basic], FormStep::Review).unwrap();
    assert_eq!(nav.current_step(), FormStep::Basic);
  }

  #[test]
  fn test_single_step_is_first_and_last() {
    let mut nav = StepNavigator::new(["only"]).unwrap();
    assert!(nav.is_first() && nav.is_last());
    assert_eq!(nav.progress(), 100.0);

    nav.next();
    nav.previous();
    assert_eq!(nav.current_step(), "only");
  }

  #[test]
  fn test_rejects_empty_and_duplicate_lists() {
    assert_eq!(
      StepNavigator::<u8>::new(Vec::new()).unwrap_err(),
      WizardError::NoSteps
    );
    assert_eq!(
      StepNavigator::new([1, 2, 1]).unwrap_err(),
      WizardError::DuplicateStep("1".to_string())
    );
  }

  #[test]
  fn test_form_step_wire_names() {
    let json = serde_json::to_string(&FormStep::Conditions).unwrap();
    assert_eq!(json, "\"conditions\"");
    assert_eq!(FormStep::Basic.title(), "Basic Info");
  }
}
