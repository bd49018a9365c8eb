//! Concrete implementations of the [`AssetLoader`](crate::traits::AssetLoader)
//! seam.
//!
//! - [`FsAssetLoader`] - assets under a local directory
//! - [`HttpAssetLoader`] - assets under an HTTP base URL
//!
//! The [`mock`] submodule provides [`mock::InMemoryAssets`] for tests.

pub mod fs_assets;
pub mod http_assets;
pub mod mock;

pub use fs_assets::FsAssetLoader;
pub use http_assets::{is_http_url, HttpAssetLoader, HttpLoaderError};
pub use mock::InMemoryAssets;

use std::sync::Arc;

use crate::traits::AssetLoader;

/// Pick a loader for an `--assets` location: HTTP for URLs, else a
/// directory.
pub fn loader_for(location: &str) -> Result<Arc<dyn AssetLoader>, HttpLoaderError> {
    if is_http_url(location) {
        Ok(Arc::new(HttpAssetLoader::new(location)?))
    } else {
        Ok(Arc::new(FsAssetLoader::new(location)))
    }
}
