//! HTTP cache control module
//!
//! Decides which responses carry a far-future `Cache-Control` directive.

/// One year, in seconds
pub const IMMUTABLE_MAX_AGE: u32 = 31_536_000;

/// Extensions treated as immutable static assets (images and fonts).
/// Every entry is also a key of [`super::mime::MIME_TYPES`].
pub const CACHEABLE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".webp", ".woff", ".woff2", ".ttf", ".eot",
];

/// Cache control policy attached to a successful response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// No `Cache-Control` header at all
    Unspecified,
}

impl CachePolicy {
    /// Policy for a normalized extension (see [`super::mime::extension_of`])
    pub fn for_extension(extension: &str) -> Self {
        if is_cacheable(extension) {
            Self::Public(IMMUTABLE_MAX_AGE)
        } else {
            Self::Unspecified
        }
    }

    /// Convert to Cache-Control header value, if any
    pub fn to_header_value(self) -> Option<String> {
        match self {
            Self::Public(max_age) => Some(format!("public, max-age={max_age}")),
            Self::Unspecified => None,
        }
    }
}

/// Whether a normalized extension belongs to the cacheable set
pub fn is_cacheable(extension: &str) -> bool {
    CACHEABLE_EXTENSIONS.iter().any(|ext| *ext == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mime::MIME_TYPES;

    #[test]
    fn test_cacheable_set_is_subset_of_mime_table() {
        for ext in CACHEABLE_EXTENSIONS {
            assert!(
                MIME_TYPES.iter().any(|(known, _)| known == ext),
                "{ext} is cacheable but has no MIME entry"
            );
        }
    }

    #[test]
    fn test_cache_policy() {
        assert_eq!(
            CachePolicy::for_extension(".png").to_header_value().as_deref(),
            Some("public, max-age=31536000")
        );
        assert_eq!(
            CachePolicy::for_extension(".woff2"),
            CachePolicy::Public(IMMUTABLE_MAX_AGE)
        );
        assert_eq!(CachePolicy::for_extension(".html"), CachePolicy::Unspecified);
        assert_eq!(CachePolicy::for_extension(".css"), CachePolicy::Unspecified);
        assert_eq!(CachePolicy::for_extension(".xyz"), CachePolicy::Unspecified);
        assert_eq!(CachePolicy::for_extension(""), CachePolicy::Unspecified);
        assert_eq!(CachePolicy::Unspecified.to_header_value(), None);
    }

    #[test]
    fn test_non_asset_types_are_not_cacheable() {
        for ext in [".html", ".css", ".js", ".json", ".mp4", ".webm", ".mp3", ".wav"] {
            assert!(!is_cacheable(ext), "{ext} must not be cacheable");
        }
    }
}
