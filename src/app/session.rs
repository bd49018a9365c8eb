//! Session state: the input values typed so far.

use tracing::debug;

use crate::models::InputValues;
use crate::store::sanitize;

/// Field → value map shared by every screen. Cleared only when a login
/// succeeds.
#[derive(Debug, Default, Clone)]
pub struct Session {
    input_values: InputValues,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_values(&self) -> &InputValues {
        &self.input_values
    }

    pub fn value(&self, field: &str) -> &str {
        self.input_values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Store a value as typed.
    pub fn set_raw(&mut self, field: &str, value: &str) {
        self.input_values.insert(field.to_string(), value.to_string());
    }

    /// Store the sanitized value once editing ends.
    pub fn commit(&mut self, field: &str, value: &str) -> String {
        let clean = sanitize(value);
        debug!("Committed {} ({} chars)", field, clean.chars().count());
        self.input_values.insert(field.to_string(), clean.clone());
        clean
    }

    pub fn clear(&mut self) {
        self.input_values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_sanitizes() {
        let mut session = Session::new();
        session.set_raw("name", "  <Ann>  ");
        assert_eq!(session.value("name"), "  <Ann>  ");
        assert_eq!(session.commit("name", "  <Ann>  "), "Ann");
        assert_eq!(session.value("name"), "Ann");
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.set_raw("mst", "1");
        session.clear();
        assert!(session.input_values().is_empty());
        assert_eq!(session.value("mst"), "");
    }
}
