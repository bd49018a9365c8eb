use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use super::{deserialize_nullable_string, InputValues};

/// Screen id → ordered hotspot list.
pub type HotspotMap = BTreeMap<String, Vec<Hotspot>>;

/// On-disk shape of `hotspot.json`: `{ "screens": { id: [Hotspot] } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotspotDocument {
    #[serde(default)]
    pub screens: HotspotMap,
}

/// Login credentials a `login` hotspot accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub mst: String,
    pub password: String,
}

/// A percentage-positioned interactive rectangle on a screen.
///
/// Geometry is kept as written (see [`Percent`]) so that a load → serialize
/// round trip reproduces the document. Keys this type does not know about
/// are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub id: String,
    #[serde(default)]
    pub x: Percent,
    #[serde(default)]
    pub y: Percent,
    #[serde(default)]
    pub width: Percent,
    #[serde(default)]
    pub height: Percent,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One geometry value exactly as the document wrote it.
///
/// Documents use either percentage strings (`"12.5%"`) or bare JSON numbers
/// (`12.5`). The raw text is kept together with which of the two it was, and
/// serialization writes the same kind back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Percent {
    raw: String,
    numeric: bool,
}

impl Percent {
    /// A value that serializes as a JSON number.
    pub fn number(value: f64) -> Self {
        let formatted = format_percent(value);
        Self {
            raw: formatted.trim_end_matches('%').to_string(),
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn value(&self) -> Option<f64> {
        parse_percent(&self.raw)
    }

    /// Replace the value, keeping the notation the document used.
    pub fn rewritten(&self, value: f64) -> Self {
        if self.numeric {
            Self::number(value)
        } else {
            Self::from(format_percent(value))
        }
    }
}

impl Deref for Percent {
    type Target = str;

    fn deref(&self) -> &str {
        &self.raw
    }
}

impl From<String> for Percent {
    fn from(raw: String) -> Self {
        Self { raw, numeric: false }
    }
}

impl From<&str> for Percent {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl PartialEq<str> for Percent {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for Percent {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(int) = self.raw.parse::<i64>() {
                return serializer.serialize_i64(int);
            }
            if let Ok(float) = self.raw.parse::<f64>() {
                return serializer.serialize_f64(float);
            }
        }
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PercentVisitor;

        impl<'de> Visitor<'de> for PercentVisitor {
            type Value = Percent;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a percentage string or number")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Percent, E> {
                Ok(Percent::from(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Percent, E> {
                Ok(Percent::from(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Percent, E> {
                Ok(Percent {
                    raw: value.to_string(),
                    numeric: true,
                })
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Percent, E> {
                Ok(Percent {
                    raw: value.to_string(),
                    numeric: true,
                })
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Percent, E> {
                Ok(Percent {
                    raw: value.to_string(),
                    numeric: true,
                })
            }

            fn visit_unit<E: de::Error>(self) -> Result<Percent, E> {
                Ok(Percent::default())
            }
        }

        deserializer.deserialize_any(PercentVisitor)
    }
}

/// Parsed hotspot geometry, all values in percent of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Keyboard flavour requested by an `input` hotspot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Number,
    #[default]
    Text,
    Password,
}

impl InputType {
    /// Unknown names fall back to [`InputType::Text`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "number" | "tel" | "numeric" => InputType::Number,
            "password" => InputType::Password,
            _ => InputType::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Number => "number",
            InputType::Text => "text",
            InputType::Password => "password",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `"12.5%"`, `"12.5"` or `" 12.5 % "` into `12.5`.
///
/// Returns `None` for blank input, garbage or NaN. Range is not checked
/// here; that is the store's job.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Format a percentage the way hotspot documents store it: at most two
/// decimals, trailing zeros dropped, with a `%` suffix.
pub fn format_percent(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{}%", trimmed)
}

impl PercentBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

impl Hotspot {
    /// Create a hotspot with the given id, geometry and action.
    pub fn new(id: impl Into<String>, geometry: PercentBox, action: impl Into<String>) -> Self {
        let mut hotspot = Self {
            id: id.into(),
            action: action.into(),
            ..Default::default()
        };
        hotspot.set_geometry(geometry);
        hotspot
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>, input_type: InputType) -> Self {
        self.field = Some(field.into());
        self.input_type = Some(input_type.as_str().to_string());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_credentials(mut self, mst: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            mst: mst.into(),
            password: password.into(),
        });
        self
    }

    /// Parsed geometry, or `None` if any field is not a number.
    pub fn geometry(&self) -> Option<PercentBox> {
        Some(PercentBox {
            x: self.x.value()?,
            y: self.y.value()?,
            width: self.width.value()?,
            height: self.height.value()?,
        })
    }

    /// Overwrite the geometry from parsed values. Each field keeps the
    /// notation it was loaded with; new hotspots use percentage strings.
    pub fn set_geometry(&mut self, geometry: PercentBox) {
        self.x = self.x.rewritten(geometry.x);
        self.y = self.y.rewritten(geometry.y);
        self.width = self.width.rewritten(geometry.width);
        self.height = self.height.rewritten(geometry.height);
    }

    /// Requested keyboard flavour, `text` when unset.
    pub fn input_kind(&self) -> InputType {
        self.input_type
            .as_deref()
            .map(InputType::parse)
            .unwrap_or_default()
    }

    /// Short spoken description used when the hotspot gains focus.
    pub fn describe(&self, input_values: &InputValues) -> String {
        match self.action.as_str() {
            "input" => {
                let field = self.field.as_deref().unwrap_or("");
                let value = input_values
                    .get(field)
                    .filter(|v| !v.is_empty())
                    .map(|v| {
                        if self.input_kind() == InputType::Password {
                            "•".repeat(v.chars().count())
                        } else {
                            v.clone()
                        }
                    })
                    .unwrap_or_else(|| "empty".to_string());
                format!("Input field {} - current value: {}", field, value)
            }
            "navigate" => format!(
                "Navigate to {}",
                self.target.as_deref().unwrap_or("nowhere")
            ),
            "login" => "Login button".to_string(),
            other => format!("Action {}", other),
        }
    }
}
