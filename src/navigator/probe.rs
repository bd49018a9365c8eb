//! Screen type inference from image dimensions.
//!
//! Only screens whose document leaves `type` unset are probed. Each probe
//! is time-boxed on its own and all of them run concurrently, so startup
//! waits at most for the slowest single probe.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::models::{Screen, ScreenType};
use crate::traits::AssetLoader;

/// How long one image may take to fetch and decode.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Height/width ratio above which a screen scrolls.
pub const SCROLLABLE_ASPECT_RATIO: f64 = 1.5;

/// Classify an image by its pixel size.
pub fn classify_dimensions(width: u32, height: u32) -> ScreenType {
    if width == 0 {
        return ScreenType::Static;
    }
    if height as f64 / width as f64 > SCROLLABLE_ASPECT_RATIO {
        ScreenType::Scrollable
    } else {
        ScreenType::Static
    }
}

/// Decode an encoded image just far enough to learn its size.
pub fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32), image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    Ok((img.width(), img.height()))
}

/// Fill in `type` for every untyped screen.
///
/// Timeouts, fetch failures and decode failures all make the screen
/// `static`. Screens that already carry a type are returned untouched.
pub async fn infer_screen_types(
    screens: Vec<Screen>,
    loader: Arc<dyn AssetLoader>,
    timeout: Duration,
) -> Vec<Screen> {
    let probes = screens.into_iter().map(|screen| {
        let loader = Arc::clone(&loader);
        async move { probe_screen(screen, loader.as_ref(), timeout).await }
    });
    join_all(probes).await
}

async fn probe_screen(mut screen: Screen, loader: &dyn AssetLoader, timeout: Duration) -> Screen {
    if screen.screen_type.is_some() {
        return screen;
    }

    let screen_type = match tokio::time::timeout(timeout, measure(loader, &screen.src)).await {
        Ok(Ok((width, height))) => {
            let kind = classify_dimensions(width, height);
            debug!(
                "Screen {} is {}x{}, classified {:?}",
                screen.id, width, height, kind
            );
            kind
        }
        Ok(Err(reason)) => {
            warn!("Failed to probe image {}: {}, using static", screen.src, reason);
            ScreenType::Static
        }
        Err(_) => {
            warn!(
                "Probing {} exceeded {:?}, using static",
                screen.src, timeout
            );
            ScreenType::Static
        }
    };

    screen.classify(screen_type);
    screen
}

async fn measure(loader: &dyn AssetLoader, src: &str) -> Result<(u32, u32), String> {
    let bytes = loader.load_bytes(src).await.map_err(|e| e.to_string())?;
    tokio::task::spawn_blocking(move || decode_dimensions(&bytes))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dimensions() {
        assert_eq!(classify_dimensions(100, 151), ScreenType::Scrollable);
        assert_eq!(classify_dimensions(100, 150), ScreenType::Static);
        assert_eq!(classify_dimensions(375, 812), ScreenType::Scrollable);
        assert_eq!(classify_dimensions(800, 600), ScreenType::Static);
        assert_eq!(classify_dimensions(0, 600), ScreenType::Static);
    }

    #[test]
    fn test_decode_dimensions_rejects_garbage() {
        assert!(decode_dimensions(b"not an image").is_err());
    }
}
