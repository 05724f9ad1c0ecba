//! Static file serving.
//!
//! Serves the output of the site generator from the configured dist
//! directory. Directory requests get their `index.html`; missing files are
//! a plain 404.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create router serving `dist_dir` as the fallback for unmatched paths.
pub(crate) fn static_router(dist_dir: &Path) -> Router<Arc<AppState>> {
    if !dist_dir.exists() {
        tracing::warn!(dist_dir = %dist_dir.display(), "Dist directory not found, static files will 404");
    }
    Router::new().fallback_service(ServeDir::new(dist_dir))
}
