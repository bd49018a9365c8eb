//! Unified error handling for tapcanvas.
//!
//! The engine separates failures into five domains:
//!
//! - **Load**: a startup asset (screens, hotspots, workflow) could not be
//!   fetched or parsed. Fatal to initialization, shown as a dismissible banner.
//! - **Validation**: a hotspot record is malformed. The hotspot is dropped
//!   from rendering, nothing else happens.
//! - **Action**: the action resolver refused a hotspot (missing field,
//!   target or credentials). Shown as a transient message.
//! - **Capture**: a screen capture was debounced, overlapped another one,
//!   had no target or failed in both strategies. Shown, never fatal.
//! - **Navigation**: the requested screen does not exist or the navigator
//!   refused to move. Shown, never fatal.
//!
//! Store, navigator and workflow guard never return `Err` for expected
//! domain failures; they hand back tagged results that carry one of these
//! enums. Only transport failures propagate as errors, and the controller
//! catches them once during initialization.
//!
//! # Example
//!
//! ```ignore
//! use tapcanvas::error::{ErrorContext, ProtoResult, ResultExt};
//!
//! async fn load(loader: &dyn AssetLoader) -> ProtoResult<Vec<Screen>> {
//!     let text = loader
//!         .load_text("screens.json")
//!         .await
//!         .map_err(ProtoError::from)
//!         .context(ErrorContext::new("load_screens").with_asset("screens.json"))?;
//!     // ...
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Asset transport failed | Yes |
//! | Configuration | Asset parsed but malformed | No |
//! | User | Bad input or unreachable target | No |
//! | Busy | Operation refused while another runs | Yes |
//! | System | Filesystem or clipboard trouble | Sometimes |

mod action;
mod capture;
mod category;
mod context;
mod load;
mod navigation;
mod proto_error;
mod result;
mod validation;

pub use action::ActionError;
pub use capture::CaptureError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use load::LoadError;
pub use navigation::{NavigationError, StepDirection};
pub use proto_error::ProtoError;
pub use result::{ProtoResult, ResultExt};
pub use validation::ValidationError;
