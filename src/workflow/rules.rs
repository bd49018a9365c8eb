//! Field validation rules used by workflow steps.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("valid regex"));

/// A parsed rule name such as `"email"` or `"minLength:6"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    Phone,
    Number,
    MinLength(usize),
    MaxLength(usize),
    /// Anything else. Always passes.
    Unknown(String),
}

impl Rule {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "required" => return Rule::Required,
            "email" => return Rule::Email,
            "phone" => return Rule::Phone,
            "number" => return Rule::Number,
            _ => {}
        }

        let bounded = raw.split_once(':').and_then(|(name, n)| {
            let n = n.trim().parse::<usize>().ok()?;
            match name.trim() {
                "minLength" => Some(Rule::MinLength(n)),
                "maxLength" => Some(Rule::MaxLength(n)),
                _ => None,
            }
        });
        bounded.unwrap_or_else(|| Rule::Unknown(raw.to_string()))
    }

    /// Check a field value. Known rules fail on a missing or empty value.
    pub fn check(&self, value: Option<&str>) -> bool {
        if let Rule::Unknown(_) = self {
            return true;
        }
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return false;
        };

        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::Email => EMAIL.is_match(value),
            Rule::Phone => PHONE.is_match(value),
            Rule::Number => value.trim().parse::<f64>().is_ok_and(|n| !n.is_nan()),
            Rule::MinLength(n) => value.chars().count() >= *n,
            Rule::MaxLength(n) => value.chars().count() <= *n,
            Rule::Unknown(_) => true,
        }
    }
}
