//! HTTP request handlers.

pub(crate) mod config;
pub(crate) mod navigation;
pub(crate) mod redirects;
