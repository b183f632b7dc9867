//! Request handler module
//!
//! Turns every request into a static file response.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
