//! Hotspot action resolution.
//!
//! Resolution is pure: it reads the hotspot and the session's input values
//! and reports what should happen. Carrying it out (opening the keyboard,
//! moving the navigator) is the controller's job.

use tracing::debug;

use super::sanitize::sanitize;
use crate::error::ActionError;
use crate::models::{Hotspot, InputType, InputValues};

/// Input field keys a `login` hotspot reads.
pub const LOGIN_ID_FIELD: &str = "mst";
pub const LOGIN_PASSWORD_FIELD: &str = "password";

/// What a successfully resolved hotspot asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Focus an input field with the given keyboard flavour.
    Input { field: String, input_type: InputType },
    /// Go to another screen.
    Navigate { target: String },
    /// Credentials matched. The target may be absent.
    Login { target: Option<String> },
}

impl ActionOutcome {
    /// The action name this outcome came from.
    pub fn action(&self) -> &'static str {
        match self {
            ActionOutcome::Input { .. } => "input",
            ActionOutcome::Navigate { .. } => "navigate",
            ActionOutcome::Login { .. } => "login",
        }
    }
}

/// Resolve a hotspot's action against the current input values.
pub fn resolve(hotspot: &Hotspot, input_values: &InputValues) -> Result<ActionOutcome, ActionError> {
    match hotspot.action.as_str() {
        "input" => {
            let field = non_empty(hotspot.field.as_deref()).ok_or(ActionError::MissingField)?;
            Ok(ActionOutcome::Input {
                field: field.to_string(),
                input_type: hotspot.input_kind(),
            })
        }
        "navigate" => {
            let target = non_empty(hotspot.target.as_deref()).ok_or(ActionError::MissingTarget)?;
            Ok(ActionOutcome::Navigate {
                target: target.to_string(),
            })
        }
        "login" => {
            let credentials = hotspot
                .credentials
                .as_ref()
                .ok_or(ActionError::MissingCredentials)?;

            let mst = non_empty(input_values.get(LOGIN_ID_FIELD).map(String::as_str));
            let password = non_empty(input_values.get(LOGIN_PASSWORD_FIELD).map(String::as_str));
            let (Some(mst), Some(password)) = (mst, password) else {
                return Err(ActionError::MissingInputValues);
            };

            if sanitize(mst) != credentials.mst || sanitize(password) != credentials.password {
                debug!("Login rejected for hotspot {}", hotspot.id);
                return Err(ActionError::InvalidCredentials);
            }

            Ok(ActionOutcome::Login {
                target: non_empty(hotspot.target.as_deref()).map(str::to_string),
            })
        }
        other => Err(ActionError::UnknownAction(other.to_string())),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PercentBox;

    fn geometry() -> PercentBox {
        PercentBox::new(10.0, 10.0, 20.0, 5.0)
    }

    fn login_button() -> Hotspot {
        Hotspot::new("login_btn", geometry(), "login")
            .with_target("home")
            .with_credentials("123456789", "password123")
    }

    fn values(mst: &str, password: &str) -> InputValues {
        let mut values = InputValues::new();
        values.insert("mst".to_string(), mst.to_string());
        values.insert("password".to_string(), password.to_string());
        values
    }

    #[test]
    fn test_input_defaults_to_text() {
        let mut hotspot = Hotspot::new("f", geometry(), "input");
        hotspot.field = Some("mst".to_string());
        assert_eq!(
            resolve(&hotspot, &InputValues::new()),
            Ok(ActionOutcome::Input {
                field: "mst".to_string(),
                input_type: InputType::Text
            })
        );
    }

    #[test]
    fn test_input_without_field() {
        let hotspot = Hotspot::new("f", geometry(), "input");
        assert_eq!(resolve(&hotspot, &InputValues::new()), Err(ActionError::MissingField));
    }

    #[test]
    fn test_navigate() {
        let hotspot = Hotspot::new("n", geometry(), "navigate").with_target("dashboard");
        assert_eq!(
            resolve(&hotspot, &InputValues::new()),
            Ok(ActionOutcome::Navigate {
                target: "dashboard".to_string()
            })
        );

        let bare = Hotspot::new("n", geometry(), "navigate");
        assert_eq!(resolve(&bare, &InputValues::new()), Err(ActionError::MissingTarget));
    }

    #[test]
    fn test_login_success_yields_target() {
        let outcome = resolve(&login_button(), &values("123456789", "password123"));
        assert_eq!(
            outcome,
            Ok(ActionOutcome::Login {
                target: Some("home".to_string())
            })
        );
    }

    #[test]
    fn test_login_compares_sanitized_values() {
        let outcome = resolve(&login_button(), &values("  123456789 ", "password123"));
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_login_mismatch() {
        assert_eq!(
            resolve(&login_button(), &values("123456789", "wrong")),
            Err(ActionError::InvalidCredentials)
        );
        assert_eq!(
            resolve(&login_button(), &values("000", "password123")),
            Err(ActionError::InvalidCredentials)
        );
    }

    #[test]
    fn test_login_empty_inputs() {
        assert_eq!(
            resolve(&login_button(), &values("", "")),
            Err(ActionError::MissingInputValues)
        );
        assert_eq!(
            resolve(&login_button(), &InputValues::new()),
            Err(ActionError::MissingInputValues)
        );
    }

    #[test]
    fn test_login_without_credentials() {
        let hotspot = Hotspot::new("l", geometry(), "login");
        assert_eq!(
            resolve(&hotspot, &values("a", "b")),
            Err(ActionError::MissingCredentials)
        );
    }

    #[test]
    fn test_unknown_action_names_it() {
        let hotspot = Hotspot::new("s", geometry(), "swipe");
        let err = resolve(&hotspot, &InputValues::new()).unwrap_err();
        assert_eq!(err.to_string(), "unknown action: swipe");
    }
}
