//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`AssetLoader`] - Fetches the startup documents and screen images

pub mod assets;

pub use assets::{AssetLoader, HOTSPOTS_ASSET, SCREENS_ASSET, WORKFLOWS_ASSET};
