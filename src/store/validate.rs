//! Hotspot record validation.

use crate::error::ValidationError;
use crate::models::{parse_percent, Hotspot};

/// Check every invariant a hotspot must hold before it can be shown.
///
/// Geometry must parse as percentages; x and y lie in `[0, 100]`, width and
/// height in `(0, 100]`. Out-of-range values reject the hotspot, they are
/// never clamped.
pub fn check(hotspot: &Hotspot) -> Result<(), ValidationError> {
    if hotspot.id.trim().is_empty() {
        return Err(ValidationError::MissingId);
    }
    let id = &hotspot.id;

    let fields: [(&'static str, &str, bool); 4] = [
        ("x", hotspot.x.as_str(), true),
        ("y", hotspot.y.as_str(), true),
        ("width", hotspot.width.as_str(), false),
        ("height", hotspot.height.as_str(), false),
    ];

    for (name, raw, _) in fields {
        if raw.trim().is_empty() {
            return Err(ValidationError::MissingGeometry {
                id: id.clone(),
                field: name,
            });
        }
    }

    if hotspot.action.trim().is_empty() {
        return Err(ValidationError::MissingAction { id: id.clone() });
    }

    for (name, raw, zero_allowed) in fields {
        let value = parse_percent(raw).ok_or_else(|| ValidationError::NotANumber {
            id: id.clone(),
            field: name,
            value: raw.to_string(),
        })?;
        let low_ok = if zero_allowed { value >= 0.0 } else { value > 0.0 };
        if !low_ok || value > 100.0 {
            return Err(ValidationError::OutOfRange {
                id: id.clone(),
                field: name,
                value,
            });
        }
    }

    Ok(())
}
