//! Configuration API endpoint.
//!
//! Returns site settings, theme options and plugin tables for the frontend.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use dojo_site::SiteInfo;

use crate::state::AppState;

/// Handle GET /api/config.
pub(crate) async fn get_config(State(state): State<Arc<AppState>>) -> Json<SiteInfo> {
    Json(state.site.info().clone())
}
