//! Asset loader trait abstraction.
//!
//! The prototype reads three JSON documents and one image per screen. Where
//! they come from (a directory, an HTTP server, memory in tests) is hidden
//! behind [`AssetLoader`].

use async_trait::async_trait;

use crate::error::LoadError;

/// Name of the screen list document.
pub const SCREENS_ASSET: &str = "screens.json";
/// Name of the hotspot map document.
pub const HOTSPOTS_ASSET: &str = "hotspot.json";
/// Name of the workflow graph document.
pub const WORKFLOWS_ASSET: &str = "workflows.json";

/// Source of prototype assets.
///
/// Names are relative paths such as `"screens.json"` or the `src` of a
/// screen. Implementations resolve them against their own root.
///
/// # Example
///
/// ```ignore
/// use tapcanvas::traits::AssetLoader;
///
/// async fn screens_text<L: AssetLoader>(loader: &L) -> Result<String, LoadError> {
///     loader.load_text("screens.json").await
/// }
/// ```
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Fetch an asset as UTF-8 text.
    async fn load_text(&self, name: &str) -> Result<String, LoadError>;

    /// Fetch an asset as raw bytes.
    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError>;

    /// Human readable location, for logs and the status line.
    fn describe(&self) -> String;
}
