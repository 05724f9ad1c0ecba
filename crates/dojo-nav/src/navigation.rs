//! Per-locale navigation.
//!
//! A site may serve several locales under path prefixes (`/`, `/zh/`, ...).
//! Each locale gets its own navbar and sidebar; a locale that does not
//! declare one inherits the theme-level default.

use serde::{Deserialize, Serialize};

use crate::node::{LinkNode, NavEntry, NavNode, build_navbar, build_sidebar};
use crate::NavError;

/// Prefix of the default locale.
const ROOT_LOCALE: &str = "/";

/// Navbar and sidebar of one locale.
///
/// `Deserialize` reads back what `Serialize` wrote and performs none of the
/// checks of [`NavigationBuilder`]; build from configuration with the builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleNavigation {
    prefix: String,
    navbar: Vec<LinkNode>,
    sidebar: Vec<NavNode>,
}

impl LocaleNavigation {
    /// Locale path prefix (e.g. `/` or `/zh/`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Flat navbar in declared order.
    #[must_use]
    pub fn navbar(&self) -> &[LinkNode] {
        &self.navbar
    }

    /// Sidebar tree in declared order.
    #[must_use]
    pub fn sidebar(&self) -> &[NavNode] {
        &self.sidebar
    }

    /// Every clickable path in the navbar and sidebar, with its location.
    #[must_use]
    pub fn links(&self) -> Vec<NavLink<'_>> {
        let mut links: Vec<NavLink<'_>> = self
            .navbar
            .iter()
            .enumerate()
            .map(|(i, link)| NavLink {
                at: format!("navbar[{i}]"),
                text: &link.text,
                path: &link.path,
            })
            .collect();

        for (i, node) in self.sidebar.iter().enumerate() {
            collect_links(node, &format!("sidebar[{i}]"), &mut links);
        }

        links
    }
}

fn collect_links<'a>(node: &'a NavNode, at: &str, links: &mut Vec<NavLink<'a>>) {
    if let Some(path) = node.path() {
        links.push(NavLink {
            at: at.to_owned(),
            text: node.text(),
            path,
        });
    }
    for (i, child) in node.children().iter().enumerate() {
        collect_links(child, &format!("{at}.children[{i}]"), links);
    }
}

/// A clickable path found in the navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink<'a> {
    /// Location of the node, e.g. `sidebar[0].children[2]`.
    pub at: String,
    /// Display text of the node.
    pub text: &'a str,
    /// Target path or URL.
    pub path: &'a str,
}

/// Navigation for every locale of the site.
///
/// Deserializing is for round-trips only, see [`LocaleNavigation`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    locales: Vec<LocaleNavigation>,
}

impl Navigation {
    /// All locales in the order [`NavigationBuilder::locale`] was called.
    #[must_use]
    pub fn locales(&self) -> &[LocaleNavigation] {
        &self.locales
    }

    /// Locale with exactly this prefix.
    #[must_use]
    pub fn locale(&self, prefix: &str) -> Option<&LocaleNavigation> {
        self.locales.iter().find(|locale| locale.prefix == prefix)
    }

    /// Locale serving `path`: the one with the longest matching prefix.
    ///
    /// `/zh` matches the `/zh/` locale.
    #[must_use]
    pub fn for_path(&self, path: &str) -> Option<&LocaleNavigation> {
        self.locales
            .iter()
            .filter(|locale| {
                path.starts_with(&locale.prefix)
                    || (locale.prefix != ROOT_LOCALE
                        && path == locale.prefix.trim_end_matches('/'))
            })
            .max_by_key(|locale| locale.prefix.len())
    }
}

/// Locale declaration collected by [`NavigationBuilder::locale`].
#[derive(Debug)]
struct LocaleEntries<'a> {
    prefix: &'a str,
    navbar: Option<&'a [NavEntry]>,
    sidebar: Option<&'a [NavEntry]>,
}

/// Builds a [`Navigation`] from configuration entries.
#[derive(Debug, Default)]
pub struct NavigationBuilder<'a> {
    navbar: &'a [NavEntry],
    sidebar: &'a [NavEntry],
    locales: Vec<LocaleEntries<'a>>,
}

impl<'a> NavigationBuilder<'a> {
    /// Create a builder with empty defaults and no locales.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Theme-level navbar and sidebar, inherited by locales that do not
    /// declare their own.
    pub fn defaults(&mut self, navbar: &'a [NavEntry], sidebar: &'a [NavEntry]) -> &mut Self {
        self.navbar = navbar;
        self.sidebar = sidebar;
        self
    }

    /// Declare a locale. `None` inherits the default.
    pub fn locale(
        &mut self,
        prefix: &'a str,
        navbar: Option<&'a [NavEntry]>,
        sidebar: Option<&'a [NavEntry]>,
    ) -> &mut Self {
        self.locales.push(LocaleEntries {
            prefix,
            navbar,
            sidebar,
        });
        self
    }

    /// Validate every entry and build the navigation.
    ///
    /// Without declared locales the result has a single `/` locale holding
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns the first [`NavError`] found.
    pub fn build(&self) -> Result<Navigation, NavError> {
        let navbar = build_navbar(self.navbar, "navbar")?;
        let sidebar = build_sidebar(self.sidebar, "sidebar")?;

        if self.locales.is_empty() {
            return Ok(Navigation {
                locales: vec![LocaleNavigation {
                    prefix: ROOT_LOCALE.to_owned(),
                    navbar,
                    sidebar,
                }],
            });
        }

        let mut locales: Vec<LocaleNavigation> = Vec::with_capacity(self.locales.len());
        for entries in &self.locales {
            let prefix = entries.prefix;
            if !prefix.starts_with('/') || !prefix.ends_with('/') {
                return Err(NavError::InvalidLocale {
                    prefix: prefix.to_owned(),
                });
            }
            if locales.iter().any(|locale| locale.prefix == prefix) {
                return Err(NavError::DuplicateLocale {
                    prefix: prefix.to_owned(),
                });
            }

            let locale_navbar = match entries.navbar {
                Some(own) => build_navbar(own, &format!("locales[{prefix:?}].navbar"))?,
                None => navbar.clone(),
            };
            let locale_sidebar = match entries.sidebar {
                Some(own) => build_sidebar(own, &format!("locales[{prefix:?}].sidebar"))?,
                None => sidebar.clone(),
            };

            tracing::debug!(
                locale = prefix,
                navbar = locale_navbar.len(),
                sidebar = locale_sidebar.len(),
                "Built locale navigation"
            );
            locales.push(LocaleNavigation {
                prefix: prefix.to_owned(),
                navbar: locale_navbar,
                sidebar: locale_sidebar,
            });
        }

        Ok(Navigation { locales })
    }
}
