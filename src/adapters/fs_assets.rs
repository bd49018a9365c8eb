//! Directory-backed asset loader.
//!
//! Resolves asset names against a root directory and reads them with
//! `tokio::fs`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::LoadError;
use crate::traits::AssetLoader;

/// Loads prototype assets from a local directory.
///
/// # Example
///
/// ```ignore
/// use tapcanvas::adapters::FsAssetLoader;
/// use tapcanvas::traits::AssetLoader;
///
/// let loader = FsAssetLoader::new("./prototype");
/// let screens = loader.load_text("screens.json").await?;
/// ```
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of an asset. Leading slashes are ignored so that
    /// `"/images/a.png"` stays inside the root.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name.trim_start_matches('/'))
    }

    fn convert_error(name: &str, err: std::io::Error) -> LoadError {
        match err.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                asset: name.to_string(),
            },
            _ => LoadError::Unreachable {
                asset: name.to_string(),
                message: err.to_string(),
            },
        }
    }
}

#[async_trait]
impl AssetLoader for FsAssetLoader {
    async fn load_text(&self, name: &str) -> Result<String, LoadError> {
        let path = self.resolve(name);
        debug!("Reading {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Self::convert_error(name, e))
    }

    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(name);
        debug!("Reading {}", path.display());
        tokio::fs::read(&path)
            .await
            .map_err(|e| Self::convert_error(name, e))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
