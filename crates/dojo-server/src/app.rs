//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::redirect;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `dist_dir` - Directory of the generated site
pub(crate) fn create_router(state: Arc<AppState>, dist_dir: &Path) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/api/config", get(handlers::config::get_config))
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/redirects", get(handlers::redirects::list_redirects))
        .route(
            "/api/redirects/resolve",
            get(handlers::redirects::resolve_redirect),
        );

    // Static files for everything else
    let router = Router::new()
        .merge(api_routes)
        .merge(static_files::static_router(dist_dir));

    // Redirects run before any route, static files included
    let router = redirect::install_redirects(router, Arc::clone(&state.site));

    router
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
