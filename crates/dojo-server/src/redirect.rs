//! Redirect middleware.
//!
//! The whole redirect table is installed in one call with
//! [`install_redirects`]. Each request is looked up once: a match answers
//! with a redirect to the target, anything else continues to the router.
//! Chains are followed by the client, one request per hop.
//!
//! Rules are written as plain UTF-8 paths: the request path is
//! percent-decoded before lookup and the target percent-encoded in the
//! `Location` header.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use dojo_config::RedirectStatus;
use dojo_site::Site;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Bytes escaped in a `Location` header besides controls and non-ASCII.
/// `%` is kept so already-encoded targets pass through unchanged.
const LOCATION: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Install the site's redirect table in front of every route of `router`.
pub(crate) fn install_redirects<S>(router: Router<S>, site: Arc<Site>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    tracing::debug!(redirects = site.redirects().len(), "Installing redirects");
    router.layer(middleware::from_fn_with_state(site, redirect_request))
}

async fn redirect_request(State(site): State<Arc<Site>>, request: Request, next: Next) -> Response {
    let location = {
        let path = percent_decode_str(request.uri().path()).decode_utf8_lossy();
        site.redirects().resolve(&path).map(location_header)
    };
    let Some(location) = location else {
        return next.run(request).await;
    };

    tracing::debug!(from = request.uri().path(), to = %location, "Redirecting");
    match site.redirect_status() {
        RedirectStatus::Temporary => Redirect::temporary(&location).into_response(),
        RedirectStatus::Permanent => Redirect::permanent(&location).into_response(),
    }
}

fn location_header(target: &str) -> String {
    utf8_percent_encode(target, LOCATION).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_location_header_encodes_non_ascii() {
        assert_eq!(location_header("/zh/新"), "/zh/%E6%96%B0");
        assert_eq!(location_header("/zh/新#top"), "/zh/%E6%96%B0#top");
        assert_eq!(location_header("/a b"), "/a%20b");
    }

    #[test]
    fn test_location_header_keeps_encoded_targets() {
        assert_eq!(location_header("/zh/%E6%96%B0"), "/zh/%E6%96%B0");
        assert_eq!(location_header("/blog/?page=2#top"), "/blog/?page=2#top");
    }
}
