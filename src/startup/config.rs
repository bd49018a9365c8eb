//! Application configuration.
//!
//! Built from defaults, then environment variables, then CLI flags, each
//! layer overriding the previous one.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{loader_for, HttpLoaderError};
use crate::cli::CliOptions;
use crate::navigator::PROBE_TIMEOUT;
use crate::traits::AssetLoader;

pub const ENV_ASSETS: &str = "TAPCANVAS_ASSETS";
pub const ENV_CAPTURE_DIR: &str = "TAPCANVAS_CAPTURE_DIR";
pub const ENV_AUTHOR: &str = "TAPCANVAS_AUTHOR";
pub const ENV_LOG: &str = "TAPCANVAS_LOG";
pub const ENV_WATCH: &str = "TAPCANVAS_WATCH";

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for a tapcanvas session.
///
/// Use the builder methods to customize.
///
/// # Example
///
/// ```ignore
/// use tapcanvas::startup::AppConfig;
///
/// let config = AppConfig::default()
///     .with_assets("./prototype")
///     .with_author_mode(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory or `http(s)://` base URL holding the startup documents
    pub assets: String,
    /// Where captures are written
    pub capture_dir: PathBuf,
    /// Start in author mode
    pub author_mode: bool,
    /// Per-screen hotspot source directory to merge and watch
    pub hotspot_dir: Option<PathBuf>,
    /// tracing `EnvFilter` directive
    pub log_filter: String,
    /// Log file path
    pub log_file: PathBuf,
    /// Per-image timeout for screen-type inference
    pub probe_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets: ".".to_string(),
            capture_dir: default_capture_dir(),
            author_mode: false,
            hotspot_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: default_log_file(),
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

/// The user's download directory, else the working directory.
pub fn default_capture_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tapcanvas")
        .join("tapcanvas.log")
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(mut self, assets: impl Into<String>) -> Self {
        self.assets = assets.into();
        self
    }

    pub fn with_capture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.capture_dir = dir.into();
        self
    }

    pub fn with_author_mode(mut self, author_mode: bool) -> Self {
        self.author_mode = author_mode;
        self
    }

    pub fn with_hotspot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.hotspot_dir = Some(dir.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Create config from `TAPCANVAS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(assets) = lookup(ENV_ASSETS).filter(|v| !v.is_empty()) {
            config.assets = assets;
        }
        if let Some(dir) = lookup(ENV_CAPTURE_DIR).filter(|v| !v.is_empty()) {
            config.capture_dir = PathBuf::from(dir);
        }
        if let Some(author) = lookup(ENV_AUTHOR) {
            config.author_mode = is_truthy(&author);
        }
        if let Some(dir) = lookup(ENV_WATCH).filter(|v| !v.is_empty()) {
            config.hotspot_dir = Some(PathBuf::from(dir));
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            config.log_filter = filter;
        }
        config
    }

    /// Apply command-line flags on top.
    pub fn with_cli(mut self, options: &CliOptions) -> Self {
        if let Some(assets) = &options.assets {
            self.assets = assets.clone();
        }
        if let Some(dir) = &options.watch {
            self.hotspot_dir = Some(dir.clone());
        }
        if let Some(dir) = &options.capture_dir {
            self.capture_dir = dir.clone();
        }
        if options.author {
            self.author_mode = true;
        }
        self
    }

    /// Loader for [`assets`](Self::assets).
    pub fn asset_loader(&self) -> Result<Arc<dyn AssetLoader>, HttpLoaderError> {
        loader_for(&self.assets)
    }
}
