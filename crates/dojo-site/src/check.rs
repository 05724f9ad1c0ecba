//! Dead link detection.
//!
//! A navigation link is alive when following the redirect table from it
//! ends on an indexed page. A redirect is alive when its target does.
//! External URLs and relative targets are not checked.

use dojo_nav::{Navigation, is_external};
use dojo_redirects::{RedirectTable, path_part};
use serde::Serialize;

use crate::content::ContentIndex;

/// Link with no content page behind it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeadLink {
    /// Where the link was declared, e.g. `locales["/"].navbar[0]` or
    /// `redirects["/old"]`.
    pub at: String,
    /// Display text, for navigation links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The unresolved path.
    pub path: String,
}

/// Find navigation links that do not lead to a page.
#[must_use]
pub fn check_links(
    navigation: &Navigation,
    redirects: &RedirectTable,
    content: &ContentIndex,
) -> Vec<DeadLink> {
    let mut dead = Vec::new();

    for locale in navigation.locales() {
        for link in locale.links() {
            if is_alive(link.path, redirects, content) {
                continue;
            }
            tracing::debug!(locale = locale.prefix(), at = %link.at, path = link.path, "Dead link");
            dead.push(DeadLink {
                at: format!("locales[{:?}].{}", locale.prefix(), link.at),
                text: Some(link.text.to_owned()),
                path: link.path.to_owned(),
            });
        }
    }

    dead
}

/// Find redirects whose target does not lead to a page.
#[must_use]
pub fn check_redirects(redirects: &RedirectTable, content: &ContentIndex) -> Vec<DeadLink> {
    redirects
        .effective()
        .filter(|entry| !is_alive(&entry.to, redirects, content))
        .map(|entry| DeadLink {
            at: format!("redirects[{:?}]", entry.from),
            text: None,
            path: entry.to.clone(),
        })
        .collect()
}

fn is_alive(path: &str, redirects: &RedirectTable, content: &ContentIndex) -> bool {
    if is_external(path) || !path.starts_with('/') {
        return true;
    }
    redirects
        .trace(path_part(path))
        .last()
        .is_some_and(|last| content.contains(last))
}
