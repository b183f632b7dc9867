//! MIME type detection module
//!
//! Maps a normalized file extension (lowercase, leading dot included) to the
//! Content-Type served for it.

use std::path::Path;

/// Content-Type used when the extension is absent or not in [`MIME_TYPES`]
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension to Content-Type table. Keys are lowercase and keep the leading dot.
pub const MIME_TYPES: &[(&str, &str)] = &[
    // Text
    (".html", "text/html"),
    (".css", "text/css"),
    // Scripts/data
    (".js", "application/javascript"),
    (".json", "application/json"),
    // Images
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".png", "image/png"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),
    (".ico", "image/x-icon"),
    (".webp", "image/webp"),
    // Video
    (".mp4", "video/mp4"),
    (".webm", "video/webm"),
    // Audio
    (".mp3", "audio/mpeg"),
    (".wav", "audio/wav"),
    // Fonts
    (".woff", "font/woff"),
    (".woff2", "font/woff2"),
    (".ttf", "font/ttf"),
    (".eot", "application/vnd.ms-fontobject"),
];

/// Normalized extension of `path`: lowercased with the leading dot, or an
/// empty string when the file name has none.
///
/// # Examples
/// ```
/// use static_server::http::mime::extension_of;
/// use std::path::Path;
/// assert_eq!(extension_of(Path::new("img/Logo.PNG")), ".png");
/// assert_eq!(extension_of(Path::new("LICENSE")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Get MIME Content-Type for a normalized extension
///
/// # Examples
/// ```
/// use static_server::http::mime::get_content_type;
/// assert_eq!(get_content_type(".html"), "text/html");
/// assert_eq!(get_content_type(".mp4"), "video/mp4");
/// assert_eq!(get_content_type(""), "application/octet-stream");
/// ```
pub fn get_content_type(extension: &str) -> &'static str {
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(DEFAULT_CONTENT_TYPE, |&(_, content_type)| content_type)
}
