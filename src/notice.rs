//! Transient status messages and the load-error banner.

use std::time::{Duration, Instant};

use crate::error::LoadError;

/// How long a transient notice stays up.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    shown_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// One transient notice plus an optional sticky banner.
///
/// A new notice replaces the current one and restarts the timer. The
/// banner stays until dismissed.
#[derive(Debug, Default)]
pub struct Notices {
    current: Option<Notice>,
    banner: Option<LoadError>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: impl Into<String>, level: NoticeLevel, now: Instant) {
        self.current = Some(Notice {
            text: text.into(),
            level,
            shown_at: now,
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(text, NoticeLevel::Info, Instant::now());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.show(text, NoticeLevel::Warning, Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(text, NoticeLevel::Error, Instant::now());
    }

    /// The live notice, if it has not expired.
    pub fn current(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Drop an expired notice. Returns `true` when one was dropped, so the
    /// caller knows to redraw.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }

    /// When the live notice will expire.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.current.as_ref().map(|n| n.shown_at + NOTICE_TTL)
    }

    pub fn set_banner(&mut self, error: LoadError) {
        self.banner = Some(error);
    }

    pub fn banner(&self) -> Option<&LoadError> {
        self.banner.as_ref()
    }

    /// Returns `true` when a banner was showing.
    pub fn dismiss_banner(&mut self) -> bool {
        self.banner.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_ttl() {
        let mut notices = Notices::new();
        let start = Instant::now();
        notices.show("Saved", NoticeLevel::Info, start);

        assert!(notices.current(start + Duration::from_secs(2)).is_some());
        assert!(!notices.expire(start + Duration::from_secs(2)));
        assert!(notices.current(start + NOTICE_TTL).is_none());
        assert!(notices.expire(start + NOTICE_TTL));
        assert!(notices.next_expiry().is_none());
    }

    #[test]
    fn test_retrigger_restarts_timer() {
        let mut notices = Notices::new();
        let start = Instant::now();
        notices.show("one", NoticeLevel::Info, start);
        notices.show("two", NoticeLevel::Warning, start + Duration::from_secs(2));

        let live = notices.current(start + Duration::from_secs(4)).unwrap();
        assert_eq!(live.text, "two");
        assert_eq!(live.level, NoticeLevel::Warning);
    }

    #[test]
    fn test_banner_is_sticky_until_dismissed() {
        let mut notices = Notices::new();
        notices.set_banner(LoadError::NotFound {
            asset: "screens.json".to_string(),
        });
        assert!(notices.banner().is_some());
        assert!(notices.dismiss_banner());
        assert!(!notices.dismiss_banner());
    }
}
