//! Mouse interaction for the chrome around the phone canvas.

pub mod hit_area;

pub use hit_area::{rect_contains, ClickAction, HitArea, HitAreaRegistry};
