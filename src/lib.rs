//! tapcanvas - click-through mobile prototypes in the terminal
//!
//! A prototype is a list of screen images, a hotspot map placing
//! percentage-positioned tap targets on them and an advisory workflow
//! graph. This library exposes the engine for the binary and for
//! integration tests.

pub mod adapters;
pub mod app;
pub mod capture;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod hotspot_sync;
pub mod input;
pub mod keyboard;
pub mod models;
pub mod navigator;
pub mod notice;
pub mod overlay;
pub mod signal;
pub mod startup;
pub mod store;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod workflow;
