//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use dojo_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Site built at startup; never mutated.
    pub(crate) site: Arc<Site>,
}
