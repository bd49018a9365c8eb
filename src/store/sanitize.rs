//! Text sanitizing applied to user-typed values before comparison or commit.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<script>` and `<style>` elements including their body.
static EMBEDDED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid regex")
});

/// Characters removed outright from user input.
const STRIPPED: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Drop `<script>`/`<style>` elements, strip `< > " ' &`, collapse whitespace runs to a single
/// space and trim both ends.
///
/// ```
/// use tapcanvas::store::sanitize;
/// assert_eq!(sanitize("  a \t\n b  "), "a b");
/// ```
pub fn sanitize(input: &str) -> String {
    let without_blocks = EMBEDDED_BLOCK.replace_all(input, " ");
    let stripped: String = without_blocks
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_script_element() {
        assert_eq!(
            sanitize(r#"<script>alert("xss")</script>Hello World"#),
            "Hello World"
        );
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(
            sanitize("Normal text   with   spaces"),
            "Normal text with spaces"
        );
    }

    #[test]
    fn test_sanitize_strips_loose_characters() {
        assert_eq!(sanitize(" 'quoted' & more "), "quoted more");
        assert_eq!(sanitize("1 > 0"), "1 0");
        assert_eq!(sanitize("<b>bold</b>"), "bbold/b");
    }

    #[test]
    fn test_sanitize_keeps_bracketed_text() {
        assert_eq!(sanitize("1 <2> 3"), "1 2 3");
        assert_eq!(sanitize("ab<cd>ef 1 <2> 3"), "abcdef 1 2 3");
    }

    #[test]
    fn test_sanitize_empty_and_blank() {
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_keeps_plain_credentials() {
        assert_eq!(sanitize("123456789"), "123456789");
        assert_eq!(sanitize(" password123 "), "password123");
    }
}
