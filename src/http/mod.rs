//! HTTP protocol layer module
//!
//! Provides the MIME table, cache policy, and response builders, decoupled
//! from how request paths are resolved.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use cache::CachePolicy;
pub use response::{build_404_response, build_file_response, NOT_FOUND_BODY};
