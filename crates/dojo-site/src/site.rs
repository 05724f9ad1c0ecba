//! Site assembled from configuration.

use std::collections::BTreeMap;

use dojo_config::{Config, RedirectStatus};
use dojo_nav::{NavError, Navigation, NavigationBuilder};
use dojo_redirects::{RedirectError, RedirectTable};
use serde::Serialize;

use crate::check::{DeadLink, check_links, check_redirects};
use crate::content::ContentIndex;

/// Error building a [`Site`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Invalid redirect rules.
    #[error("Invalid redirects: {0}")]
    Redirect(#[from] RedirectError),
    /// Invalid navbar or sidebar entry.
    #[error("Invalid navigation: {0}")]
    Navigation(#[from] NavError),
}

/// Site settings exposed to the theme, plugins included.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub lang: String,
    pub title: String,
    pub description: String,
    pub base: String,
    pub theme: ThemeInfo,
    /// Plugin tables exactly as configured.
    pub plugins: toml::Table,
}

/// Theme options without navigation (served separately).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<String>,
    pub last_updated: bool,
    pub locales: BTreeMap<String, LocaleInfo>,
}

/// Locale options without navigation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_language_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link_text: Option<String>,
}

/// Immutable site built once at startup.
#[derive(Debug)]
pub struct Site {
    info: SiteInfo,
    redirects: RedirectTable,
    redirect_status: RedirectStatus,
    navigation: Navigation,
}

impl Site {
    /// Build the site from configuration, validating redirects and navigation.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] on the first invalid redirect rule or navigation
    /// entry.
    pub fn from_config(config: &Config) -> Result<Self, SiteError> {
        let mut redirects = RedirectTable::builder();
        redirects
            .duplicates(config.redirects.duplicates)
            .extend(config.redirects.rules.iter().cloned());
        let redirects = redirects.build()?;

        let theme = &config.theme;
        let mut navigation = NavigationBuilder::new();
        navigation.defaults(&theme.navbar, &theme.sidebar);
        // Locales come sorted by prefix
        for (prefix, locale) in &theme.locales {
            navigation.locale(prefix, locale.navbar.as_deref(), locale.sidebar.as_deref());
        }
        let navigation = navigation.build()?;

        let info = SiteInfo {
            lang: config.site.lang.clone(),
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            base: config.site.base.clone(),
            theme: ThemeInfo {
                logo: theme.logo.clone(),
                repo: theme.repo.clone(),
                repo_label: theme.repo_label.clone(),
                docs_repo: theme.docs_repo.clone(),
                docs_branch: theme.docs_branch.clone(),
                docs_dir: theme.docs_dir.clone(),
                last_updated: theme.last_updated.unwrap_or(true),
                locales: theme
                    .locales
                    .iter()
                    .map(|(prefix, locale)| {
                        (
                            prefix.clone(),
                            LocaleInfo {
                                select_language_name: locale.select_language_name.clone(),
                                edit_link_text: locale.edit_link_text.clone(),
                            },
                        )
                    })
                    .collect(),
            },
            plugins: config.plugins.clone(),
        };

        tracing::info!(
            redirects = redirects.len(),
            shadowed = redirects.shadowed().count(),
            locales = navigation.locales().len(),
            plugins = info.plugins.len(),
            "Site configuration loaded"
        );

        Ok(Self {
            info,
            redirects,
            redirect_status: config.redirects.status,
            navigation,
        })
    }

    /// Site settings for the theme.
    #[must_use]
    pub fn info(&self) -> &SiteInfo {
        &self.info
    }

    /// Validated redirect table.
    #[must_use]
    pub fn redirects(&self) -> &RedirectTable {
        &self.redirects
    }

    /// HTTP status used for redirects.
    #[must_use]
    pub fn redirect_status(&self) -> RedirectStatus {
        self.redirect_status
    }

    /// Per-locale navigation.
    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Find navigation links and redirect targets with no page behind them.
    #[must_use]
    pub fn check(&self, content: &ContentIndex) -> Vec<DeadLink> {
        let mut dead = check_links(&self.navigation, &self.redirects, content);
        dead.extend(check_redirects(&self.redirects, content));
        dead
    }
}
