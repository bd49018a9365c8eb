//! Capture service: debounced, mutually exclusive PNG export of the view.
//!
//! A capture is refused outright while another one runs or within
//! [`DEBOUNCE`] of the previous attempt. Refusals are not queued. Once
//! accepted, the primary strategy runs; if it fails the fallback runs
//! silently, and only a double failure is reported.

pub mod frame;
pub mod sink;
pub mod strategy;

pub use frame::{CaptureTarget, FrameSnapshot, SCREEN_TARGET};
pub use strategy::{CaptureStrategy, CellRasterizer, OutlineRasterizer};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::CaptureError;

/// Minimum spacing between two capture attempts.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Clears the capturing flag when dropped.
struct CapturingGuard<'a>(&'a AtomicBool);

impl Drop for CapturingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct CaptureService {
    capturing: AtomicBool,
    last_attempt: Mutex<Option<Instant>>,
    debounce: Duration,
    primary: Box<dyn CaptureStrategy>,
    fallback: Box<dyn CaptureStrategy>,
    output_dir: PathBuf,
}

impl std::fmt::Debug for CaptureService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureService")
            .field("capturing", &self.is_capturing())
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl CaptureService {
    /// Service with the cell rasterizer and the outline fallback.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_strategies(
            output_dir,
            Box::new(CellRasterizer),
            Box::new(OutlineRasterizer),
        )
    }

    pub fn with_strategies(
        output_dir: impl Into<PathBuf>,
        primary: Box<dyn CaptureStrategy>,
        fallback: Box<dyn CaptureStrategy>,
    ) -> Self {
        Self {
            capturing: AtomicBool::new(false),
            last_attempt: Mutex::new(None),
            debounce: DEBOUNCE,
            primary,
            fallback,
            output_dir: output_dir.into(),
        }
    }

    /// Override the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    /// Time left before a new attempt is accepted.
    pub fn remaining_cooldown(&self) -> Duration {
        let last = *self.last_attempt.lock().unwrap_or_else(|e| e.into_inner());
        last.map(|at| self.debounce.saturating_sub(at.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Capture the region named `target` of `frame` into a PNG file.
    pub async fn capture(&self, target: &str, frame: &FrameSnapshot) -> Result<PathBuf, CaptureError> {
        if self
            .capturing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Capture already in progress");
            return Err(CaptureError::InFlight);
        }
        let _guard = CapturingGuard(&self.capturing);

        {
            let mut last = self.last_attempt.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(at) = *last {
                let elapsed = at.elapsed();
                if elapsed < self.debounce {
                    let remaining = self.debounce - elapsed;
                    warn!("Capture debounced, {:?} remaining", remaining);
                    return Err(CaptureError::Debounced { remaining });
                }
            }
            *last = Some(Instant::now());
        }

        let resolved = frame
            .target(target)
            .ok_or_else(|| CaptureError::TargetNotFound {
                target: target.to_string(),
            })?;

        let img = match self.primary.render(&resolved).await {
            Ok(img) => img,
            Err(primary) => {
                debug!(
                    "{} capture failed ({}), trying {}",
                    self.primary.name(),
                    primary,
                    self.fallback.name()
                );
                self.fallback
                    .render(&resolved)
                    .await
                    .map_err(|fallback| CaptureError::StrategiesFailed { primary, fallback })?
            }
        };

        let path = sink::write_png(&self.output_dir, img).await?;
        info!("Captured {} to {}", target, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::RgbaImage;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    struct Failing;

    #[async_trait]
    impl CaptureStrategy for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn render(&self, _target: &CaptureTarget<'_>) -> Result<RgbaImage, String> {
            Err("boom".to_string())
        }
    }

    fn frame() -> FrameSnapshot {
        let mut frame = FrameSnapshot::new(Buffer::empty(Rect::new(0, 0, 4, 4)));
        frame.add_region(SCREEN_TARGET, Rect::new(0, 0, 4, 4));
        frame
    }

    #[tokio::test]
    async fn test_capture_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = CaptureService::new(dir.path());
        let path = service.capture(SCREEN_TARGET, &frame()).await.unwrap();
        assert!(path.exists());
        assert!(!service.is_capturing());
    }

    #[tokio::test]
    async fn test_second_call_within_window_is_debounced() {
        let dir = tempfile::tempdir().unwrap();
        let service = CaptureService::new(dir.path());
        service.capture(SCREEN_TARGET, &frame()).await.unwrap();

        let err = service.capture(SCREEN_TARGET, &frame()).await.unwrap_err();
        assert!(matches!(err, CaptureError::Debounced { remaining } if remaining <= DEBOUNCE));
        assert!(service.remaining_cooldown() > Duration::ZERO);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_missing_target_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let service = CaptureService::new(dir.path());
        let err = service.capture("nowhere", &frame()).await.unwrap_err();
        assert_eq!(
            err,
            CaptureError::TargetNotFound {
                target: "nowhere".to_string()
            }
        );
        assert!(!service.is_capturing());
    }

    #[tokio::test]
    async fn test_fallback_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let service =
            CaptureService::with_strategies(dir.path(), Box::new(Failing), Box::new(OutlineRasterizer));
        assert!(service.capture(SCREEN_TARGET, &frame()).await.is_ok());
    }

    #[tokio::test]
    async fn test_double_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let service = CaptureService::with_strategies(dir.path(), Box::new(Failing), Box::new(Failing));
        let err = service.capture(SCREEN_TARGET, &frame()).await.unwrap_err();
        assert_eq!(
            err,
            CaptureError::StrategiesFailed {
                primary: "boom".to_string(),
                fallback: "boom".to_string()
            }
        );
        assert!(!service.is_capturing());
    }

    #[test]
    fn test_no_cooldown_before_first_attempt() {
        let service = CaptureService::new("/tmp");
        assert_eq!(service.remaining_cooldown(), Duration::ZERO);
    }
}
