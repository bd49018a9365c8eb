//! Mock implementations for testing.
//!
//! - [`InMemoryAssets`] - asset loader with configurable contents and failure

pub mod assets;

pub use assets::InMemoryAssets;
