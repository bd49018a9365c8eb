//! Startup: configuration, logging and the initial prototype load.
//!
//! - [`config`] - `AppConfig` from defaults, environment and CLI
//! - [`logging`] - tracing to a log file
//! - [`load`] - the three documents, loaded together
//!
//! # Usage
//!
//! ```ignore
//! use tapcanvas::startup::{load_prototype, AppConfig};
//!
//! let config = AppConfig::from_env();
//! let prototype = load_prototype(config.asset_loader()?, &config).await?;
//! ```

pub mod config;
pub mod load;
pub mod logging;

pub use config::{default_capture_dir, AppConfig};
pub use load::{load_hotspots, load_prototype, load_screens, load_workflow, Prototype};
pub use logging::init_logging;
