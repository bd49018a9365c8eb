//! Workflow guard: the step graph and per-step input validation.
//!
//! The current step mirrors the navigator's current screen; the controller
//! calls [`WorkflowGuard::set_current_step`] after every successful move.

mod rules;

pub use rules::Rule;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::models::{InputValues, Workflow, WorkflowStep, DEFAULT_INITIAL_SCREEN};
use crate::signal::Signal;

/// Error reported for a step id the workflow does not define.
pub const INVALID_STEP_MESSAGE: &str = "Invalid step configuration";

/// Outcome of [`WorkflowGuard::validate_step_inputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub missing_fields: Vec<String>,
}

#[derive(Debug)]
pub struct WorkflowGuard {
    workflow: Option<Workflow>,
    current_step: Signal<String>,
}

impl Default for WorkflowGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowGuard {
    pub fn new() -> Self {
        Self {
            workflow: None,
            current_step: Signal::new(String::new()),
        }
    }

    /// Install the workflow and move to its initial screen.
    pub fn load(&mut self, workflow: Workflow) {
        let initial = workflow.initial_screen().to_string();
        info!(
            "Loaded workflow with {} steps, initial step {}",
            workflow.screens.len(),
            initial
        );
        self.workflow = Some(workflow);
        self.current_step.set(initial);
    }

    /// Initial screen id, `"login"` when unset or not loaded.
    pub fn initial_screen(&self) -> &str {
        self.workflow
            .as_ref()
            .map(Workflow::initial_screen)
            .unwrap_or(DEFAULT_INITIAL_SCREEN)
    }

    pub fn current_step(&self) -> String {
        self.current_step.snapshot()
    }

    pub fn set_current_step(&mut self, step_id: &str) {
        debug!("Workflow step -> {}", step_id);
        self.current_step.set(step_id.to_string());
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current_step.subscribe()
    }

    pub fn step_config(&self, step_id: &str) -> Option<&WorkflowStep> {
        self.workflow.as_ref()?.step(step_id)
    }

    /// `true` iff `target` is one of the current step's next steps.
    pub fn can_navigate_to(&self, target: &str) -> bool {
        self.next_steps().iter().any(|s| s == target)
    }

    pub fn can_navigate_back(&self) -> bool {
        !self.previous_steps().is_empty()
    }

    pub fn next_steps(&self) -> &[String] {
        self.current_config()
            .map(|s| s.next_steps.as_slice())
            .unwrap_or(&[])
    }

    pub fn previous_steps(&self) -> &[String] {
        self.current_config()
            .map(|s| s.previous_steps.as_slice())
            .unwrap_or(&[])
    }

    /// Return to the initial screen. No-op until a workflow is loaded.
    pub fn reset(&mut self) {
        if self.workflow.is_some() {
            let initial = self.initial_screen().to_string();
            self.set_current_step(&initial);
        }
    }

    /// Check a step's required inputs and validation rules.
    pub fn validate_step_inputs(&self, step_id: &str, values: &InputValues) -> StepValidation {
        let Some(step) = self.step_config(step_id) else {
            return StepValidation {
                is_valid: false,
                errors: vec![INVALID_STEP_MESSAGE.to_string()],
                missing_fields: Vec::new(),
            };
        };

        let missing_fields: Vec<String> = step
            .required_inputs
            .iter()
            .filter(|field| values.get(*field).map_or(true, |v| v.trim().is_empty()))
            .cloned()
            .collect();

        let errors: Vec<String> = step
            .validations
            .iter()
            .filter(|v| !Rule::parse(&v.rule).check(values.get(&v.field).map(String::as_str)))
            .map(|v| v.message.clone())
            .collect();

        let is_valid = errors.is_empty() && missing_fields.is_empty();
        if !is_valid {
            debug!(
                "Step {} invalid: missing {:?}, errors {:?}",
                step_id, missing_fields, errors
            );
        }
        StepValidation {
            is_valid,
            errors,
            missing_fields,
        }
    }

    fn current_config(&self) -> Option<&WorkflowStep> {
        self.step_config(&self.current_step.borrow())
    }
}
