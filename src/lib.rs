//! Static file HTTP server.
//!
//! Every request path is joined onto a site root and answered with the file's
//! bytes, a Content-Type picked from its extension, and a one-year
//! `Cache-Control` for image and font assets. Anything unreadable gets a fixed
//! 404 page.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
