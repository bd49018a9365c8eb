//! In-memory asset loader for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::LoadError;
use crate::traits::AssetLoader;

/// Asset loader backed by a map of name → bytes.
///
/// # Example
///
/// ```ignore
/// use tapcanvas::adapters::mock::InMemoryAssets;
///
/// let assets = InMemoryAssets::new().with_text("screens.json", "[]");
/// assert_eq!(assets.load_text("screens.json").await?, "[]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    /// Whether every load should fail as unreachable
    should_fail: Arc<Mutex<bool>>,
    /// Names requested so far, in order
    requests: Arc<Mutex<Vec<String>>>,
}

impl InMemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, name: &str, text: &str) -> Self {
        self.insert(name, text.as_bytes().to_vec());
        self
    }

    pub fn with_bytes(self, name: &str, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&self, name: &str, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(name.to_string(), bytes);
    }

    /// Configure whether loads should fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Names requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn get(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        self.requests.lock().unwrap().push(name.to_string());
        if *self.should_fail.lock().unwrap() {
            return Err(LoadError::Unreachable {
                asset: name.to_string(),
                message: "Mock load failure".to_string(),
            });
        }
        self.files
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                asset: name.to_string(),
            })
    }
}

#[async_trait]
impl AssetLoader for InMemoryAssets {
    async fn load_text(&self, name: &str) -> Result<String, LoadError> {
        let bytes = self.get(name)?;
        String::from_utf8(bytes).map_err(|e| LoadError::Malformed {
            asset: name.to_string(),
            message: e.to_string(),
        })
    }

    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        self.get(name)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_inserted_assets() {
        let assets = InMemoryAssets::new().with_text("screens.json", "[]");
        assert_eq!(assets.load_text("screens.json").await.unwrap(), "[]");
        assert_eq!(assets.requests(), vec!["screens.json"]);
    }

    #[tokio::test]
    async fn test_missing_asset() {
        let assets = InMemoryAssets::new();
        assert!(matches!(
            assets.load_bytes("a.png").await,
            Err(LoadError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_should_fail() {
        let assets = InMemoryAssets::new().with_text("screens.json", "[]");
        assets.set_should_fail(true);
        let err = assets.load_text("screens.json").await.unwrap_err();
        assert!(err.is_transport());
    }
}
