//! Static file serving module
//!
//! Resolves request paths under the site root, loads the file, and picks its
//! Content-Type and cache directive.

use crate::config::AppState;
use crate::error::LoadError;
use crate::http::{self, mime, CachePolicy};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// A file read from disk, ready to be sent
#[derive(Debug)]
pub struct StaticFile {
    pub path: PathBuf,
    pub data: Bytes,
    pub content_type: &'static str,
    pub cache: CachePolicy,
}

/// Serve the file for `request_path`, or the fixed 404 page
pub async fn serve(state: &AppState, request_path: &str) -> Response<Full<Bytes>> {
    match load_file(&state.root, request_path, &state.config.site.default_document).await {
        Ok(file) => {
            let cache_control = file.cache.to_header_value();
            http::build_file_response(file.data, file.content_type, cache_control.as_deref())
        }
        Err(e) => {
            // Cause is for operators only; the client always sees the same 404
            if e.is_not_found() {
                logger::log_debug(&e.to_string());
            } else {
                logger::log_warning(&e.to_string());
            }
            http::build_404_response()
        }
    }
}

/// Read the file behind `request_path` from `root`.
///
/// Every call goes to disk; nothing is cached between requests.
pub async fn load_file(
    root: &Path,
    request_path: &str,
    default_document: &str,
) -> Result<StaticFile, LoadError> {
    let path = resolve_path(root, request_path, default_document)?;

    let data = fs::read(&path).await.map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;

    let extension = mime::extension_of(&path);
    Ok(StaticFile {
        content_type: mime::get_content_type(&extension),
        cache: CachePolicy::for_extension(&extension),
        data: Bytes::from(data),
        path,
    })
}

/// Map a request path onto the filesystem under `root`.
///
/// Exactly "/" maps to the default document. Otherwise each non-empty segment
/// is appended in order and `.` segments are dropped. A segment is rejected
/// when it is `..`, contains a backslash, or is not a single plain file name on
/// this platform (a drive prefix such as `C:` on Windows), so the result never
/// leaves `root`. Segments are used verbatim, with no percent-decoding.
pub fn resolve_path(
    root: &Path,
    request_path: &str,
    default_document: &str,
) -> Result<PathBuf, LoadError> {
    if request_path == "/" {
        return Ok(root.join(default_document));
    }

    let traversal = || LoadError::Traversal(request_path.to_string());

    let mut path = root.to_path_buf();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(traversal()),
            s if s.contains('\\') => return Err(traversal()),
            s => {
                let mut components = Path::new(s).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(name)), None) => path.push(name),
                    _ => return Err(traversal()),
                }
            }
        }
    }
    Ok(path)
}
