//! Post URL validation and shortcode extraction

use regex::Regex;
use url::Url;

const INSTAGRAM_HOSTS: &[&str] = &["instagram.com", "www.instagram.com"];

/// Extracts the shortcode identifying a post out of an Instagram URL.
///
/// Patterns are tried in a fixed order: `/reel/` wins over `/p/` and `/tv/`
/// when a URL somehow carries more than one of them. The first capturing
/// group of the first matching pattern is the shortcode.
pub struct ShortcodeExtractor {
    patterns: Vec<Regex>,
}

impl ShortcodeExtractor {
    pub fn new() -> Self {
        let patterns = vec![
            Regex::new(r"/reel/([A-Za-z0-9_-]+)").unwrap(),
            Regex::new(r"/p/([A-Za-z0-9_-]+)").unwrap(),
            Regex::new(r"/tv/([A-Za-z0-9_-]+)").unwrap(),
        ];
        Self { patterns }
    }

    /// Pull the shortcode out of a raw URL string, or `None` when no known
    /// path shape matches.
    pub fn extract(&self, url: &str) -> Option<String> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(url) {
                if let Some(code) = caps.get(1) {
                    return Some(code.as_str().to_string());
                }
            }
        }
        None
    }

    /// Check that a raw string is an Instagram post/reel/tv URL.
    ///
    /// Profiles, stories and anything off-host are rejected; so is any
    /// string that does not parse as a URL at all.
    pub fn is_supported_url(&self, raw: &str) -> bool {
        let parsed = match Url::parse(raw) {
            Ok(u) => u,
            Err(_) => return false,
        };
        let host = match parsed.host_str() {
            Some(h) => h.to_lowercase(),
            None => return false,
        };
        if !INSTAGRAM_HOSTS.contains(&host.as_str()) {
            return false;
        }
        self.extract(parsed.path()).is_some()
    }
}

impl Default for ShortcodeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reel() {
        let extractor = ShortcodeExtractor::new();
        assert_eq!(
            extractor.extract("https://www.instagram.com/reel/ABC123xyz/"),
            Some("ABC123xyz".to_string())
        );
    }

    #[test]
    fn test_extract_post() {
        let extractor = ShortcodeExtractor::new();
        assert_eq!(
            extractor.extract("https://www.instagram.com/p/DEF456/"),
            Some("DEF456".to_string())
        );
    }

    #[test]
    fn test_extract_tv() {
        let extractor = ShortcodeExtractor::new();
        assert_eq!(
            extractor.extract("https://www.instagram.com/tv/JKL012/"),
            Some("JKL012".to_string())
        );
    }

    #[test]
    fn test_extract_no_match() {
        let extractor = ShortcodeExtractor::new();
        assert_eq!(extractor.extract("https://www.instagram.com/username/"), None);
        assert_eq!(
            extractor.extract("https://www.instagram.com/stories/user/123/"),
            None
        );
    }

    #[test]
    fn test_reel_pattern_wins_over_post() {
        let extractor = ShortcodeExtractor::new();
        // Both shapes present: the /reel/ pattern is checked first.
        assert_eq!(
            extractor.extract("https://www.instagram.com/reel/ABC/?next=/p/XYZ/"),
            Some("ABC".to_string())
        );
        assert_eq!(
            extractor.extract("https://www.instagram.com/p/XYZ/?next=/reel/ABC/"),
            Some("ABC".to_string())
        );
    }

    #[test]
    fn test_extract_with_query() {
        let extractor = ShortcodeExtractor::new();
        assert_eq!(
            extractor.extract("https://www.instagram.com/reel/ABC123/?igsh=xxx"),
            Some("ABC123".to_string())
        );
    }

    #[test]
    fn test_supported_url_accepts_known_shapes() {
        let extractor = ShortcodeExtractor::new();
        assert!(extractor.is_supported_url("https://www.instagram.com/reel/ABC123/"));
        assert!(extractor.is_supported_url("https://www.instagram.com/p/DEF456/"));
        assert!(extractor.is_supported_url("https://www.instagram.com/tv/JKL012/"));
        assert!(extractor.is_supported_url("https://instagram.com/p/unknown"));
    }

    #[test]
    fn test_supported_url_rejects_everything_else() {
        let extractor = ShortcodeExtractor::new();
        assert!(!extractor.is_supported_url("https://www.instagram.com/username/"));
        assert!(!extractor.is_supported_url("https://www.instagram.com/reels/GHI789/"));
        assert!(!extractor.is_supported_url("https://www.youtube.com/watch?v=abc"));
        assert!(!extractor.is_supported_url("not a url"));
        assert!(!extractor.is_supported_url(""));
    }

    #[test]
    fn test_supported_url_rejects_empty_shortcode() {
        let extractor = ShortcodeExtractor::new();
        assert!(!extractor.is_supported_url("https://www.instagram.com/p/"));
    }
}
