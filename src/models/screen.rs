use serde::{Deserialize, Serialize};

/// Header height assumed for screens inferred as scrollable.
pub const DEFAULT_PINNED_HEADER: &str = "20%";

/// How a screen consumes vertical gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenType {
    /// Fits the viewport; swipes move between screens.
    Static,
    /// Taller than the viewport; swipes scroll the image.
    Scrollable,
}

/// One image in the navigable sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    pub src: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<ScreenType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_header_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Screen {
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            screen_type: None,
            pinned_header_height: None,
            images: None,
        }
    }

    pub fn with_type(mut self, screen_type: ScreenType) -> Self {
        self.screen_type = Some(screen_type);
        self
    }

    /// Untyped screens count as static until inference says otherwise.
    pub fn is_scrollable(&self) -> bool {
        self.screen_type == Some(ScreenType::Scrollable)
    }

    /// Apply an inferred classification. Scrollable screens get a pinned
    /// header unless one was configured.
    pub fn classify(&mut self, screen_type: ScreenType) {
        self.screen_type = Some(screen_type);
        if screen_type == ScreenType::Scrollable && self.pinned_header_height.is_none() {
            self.pinned_header_height = Some(DEFAULT_PINNED_HEADER.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_key_is_renamed() {
        let screen: Screen =
            serde_json::from_str(r#"{"id":"home","src":"home.png","type":"scrollable"}"#).unwrap();
        assert!(screen.is_scrollable());
        let json = serde_json::to_string(&screen).unwrap();
        assert!(json.contains(r#""type":"scrollable""#));
    }

    #[test]
    fn test_untyped_screen_is_not_scrollable() {
        let screen: Screen = serde_json::from_str(r#"{"id":"a","src":"a.png"}"#).unwrap();
        assert_eq!(screen.screen_type, None);
        assert!(!screen.is_scrollable());
    }

    #[test]
    fn test_classify_scrollable_sets_header() {
        let mut screen = Screen::new("feed", "feed.png");
        screen.classify(ScreenType::Scrollable);
        assert_eq!(screen.pinned_header_height.as_deref(), Some("20%"));

        let mut custom = Screen::new("feed", "feed.png");
        custom.pinned_header_height = Some("12%".to_string());
        custom.classify(ScreenType::Scrollable);
        assert_eq!(custom.pinned_header_height.as_deref(), Some("12%"));
    }

    #[test]
    fn test_classify_static_leaves_header() {
        let mut screen = Screen::new("a", "a.png");
        screen.classify(ScreenType::Static);
        assert_eq!(screen.screen_type, Some(ScreenType::Static));
        assert!(screen.pinned_header_height.is_none());
    }
}
