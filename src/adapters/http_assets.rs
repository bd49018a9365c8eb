//! HTTP asset loader.
//!
//! Fetches assets relative to a base URL with `reqwest`.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::error::LoadError;
use crate::traits::AssetLoader;

/// Default per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum HttpLoaderError {
    #[error("base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Loads prototype assets from an HTTP server.
///
/// # Example
///
/// ```ignore
/// use tapcanvas::adapters::HttpAssetLoader;
/// use tapcanvas::traits::AssetLoader;
///
/// let loader = HttpAssetLoader::new("http://localhost:8000/proto")?;
/// let hotspots = loader.load_text("hotspot.json").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpAssetLoader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetLoader {
    pub fn new(base_url: &str) -> Result<Self, HttpLoaderError> {
        if !is_http_url(base_url) {
            return Err(HttpLoaderError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use a preconfigured client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.trim_start_matches('/'))
    }

    async fn fetch(&self, name: &str) -> Result<reqwest::Response, LoadError> {
        let url = self.url_for(name);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Unreachable {
                asset: name.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound {
                asset: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                asset: name.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

/// `true` for `http://` and `https://` locations.
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[async_trait]
impl AssetLoader for HttpAssetLoader {
    async fn load_text(&self, name: &str) -> Result<String, LoadError> {
        self.fetch(name)
            .await?
            .text()
            .await
            .map_err(|e| LoadError::Unreachable {
                asset: name.to_string(),
                message: e.to_string(),
            })
    }

    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        self.fetch(name)
            .await?
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| LoadError::Unreachable {
                asset: name.to_string(),
                message: e.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base() {
        assert!(matches!(
            HttpAssetLoader::new("ftp://example.com"),
            Err(HttpLoaderError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_url_joining() {
        let loader = HttpAssetLoader::new("http://localhost:8000/proto/").unwrap();
        assert_eq!(loader.base_url(), "http://localhost:8000/proto");
        assert_eq!(
            loader.url_for("/images/login.png"),
            "http://localhost:8000/proto/images/login.png"
        );
    }
}
