//! Navigation API endpoint.
//!
//! Returns the navbar and sidebar of the locale serving a path.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use dojo_nav::LocaleNavigation;
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Query of GET /api/navigation.
#[derive(Deserialize)]
pub(crate) struct NavigationQuery {
    /// Page path used to pick the locale (default `/`).
    path: Option<String>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<LocaleNavigation>, ServerError> {
    let path = query.path.unwrap_or_else(|| "/".to_owned());
    state
        .site
        .navigation()
        .for_path(&path)
        .cloned()
        .map(Json)
        .ok_or(ServerError::LocaleNotFound(path))
}
