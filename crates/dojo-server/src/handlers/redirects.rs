//! Redirect API endpoints.
//!
//! Lets a client-side router register the whole table in one batch, and
//! resolve single paths without following the redirect.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use dojo_redirects::RedirectEntry;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Response for GET /api/redirects.
#[derive(Serialize)]
pub(crate) struct RedirectsResponse {
    /// Effective rules, one per source path.
    rules: Vec<RedirectEntry>,
}

/// Handle GET /api/redirects.
pub(crate) async fn list_redirects(State(state): State<Arc<AppState>>) -> Json<RedirectsResponse> {
    let rules = state.site.redirects().effective().cloned().collect();
    Json(RedirectsResponse { rules })
}

/// Query of GET /api/redirects/resolve.
#[derive(Deserialize)]
pub(crate) struct ResolveQuery {
    path: String,
}

/// Response for GET /api/redirects/resolve.
#[derive(Serialize)]
pub(crate) struct ResolveResponse {
    /// Requested path.
    path: String,
    /// Single-hop target, `null` when no redirect applies.
    target: Option<String>,
}

/// Handle GET /api/redirects/resolve.
pub(crate) async fn resolve_redirect(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolveResponse> {
    let target = state.site.redirects().resolve(&query.path).map(str::to_owned);
    Json(ResolveResponse {
        path: query.path,
        target,
    })
}
