//! Prototype data model: screens, hotspots and the workflow graph.
//!
//! All three documents are plain serde types. They are loaded once at
//! startup and, apart from hotspots edited in author mode and the inferred
//! screen type, never change afterwards.

mod hotspot;
mod screen;
mod workflow;

pub use hotspot::{
    format_percent, parse_percent, Credentials, Hotspot, HotspotDocument, HotspotMap, InputType,
    Percent, PercentBox,
};
pub use screen::{Screen, ScreenType, DEFAULT_PINNED_HEADER};
pub use workflow::{FieldValidation, Workflow, WorkflowStep, DEFAULT_INITIAL_SCREEN};

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Field name → current value, shared by every screen of a session.
pub type InputValues = HashMap<String, String>;

/// Helper to deserialize nullable strings as empty string.
/// Handles both missing fields and explicit null values.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
