use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Screen the workflow starts on when the document names none.
pub const DEFAULT_INITIAL_SCREEN: &str = "login";

/// The whole `workflows.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_screen: Option<String>,
    #[serde(default)]
    pub screens: BTreeMap<String, WorkflowStep>,
}

/// One node of the step graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub previous_steps: Vec<String>,
    #[serde(default)]
    pub required_inputs: Vec<String>,
    #[serde(default)]
    pub validations: Vec<FieldValidation>,
}

/// A rule applied to one input field, with the message shown on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl Workflow {
    pub fn initial_screen(&self) -> &str {
        self.initial_screen
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_INITIAL_SCREEN)
    }

    pub fn step(&self, id: &str) -> Option<&WorkflowStep> {
        self.screens.get(id)
    }
}

impl FieldValidation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}
