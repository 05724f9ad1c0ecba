//! `dojo nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use dojo_nav::{LocaleNavigation, Navigation};

use super::load_site;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Locale prefix, or any path inside the locale.
    #[arg(short, long, default_value = "/")]
    locale: String,

    /// Path to configuration file (default: auto-discover dojo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or no locale matches.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (_, site) = load_site(self.config.as_deref(), None)?;
        let locale = select_locale(site.navigation(), &self.locale).ok_or_else(|| {
            CliError::Validation(format!("No navigation for locale {}", self.locale))
        })?;
        Output::new().result(&serde_json::to_string_pretty(locale)?);
        Ok(())
    }
}

/// Exact prefix first, then the locale owning the path.
fn select_locale<'a>(navigation: &'a Navigation, locale: &str) -> Option<&'a LocaleNavigation> {
    navigation
        .locale(locale)
        .or_else(|| navigation.for_path(locale))
}

#[cfg(test)]
mod tests {
    use dojo_nav::{NavEntry, NavigationBuilder};
    use pretty_assertions::assert_eq;

    use super::*;

    fn navigation() -> Navigation {
        let root = [NavEntry::link("Chris Lattner FAQ", "/general/chris_faqs")];
        let zh = [NavEntry::link("常见问题", "/zh/faq")];
        let mut builder = NavigationBuilder::new();
        builder.locale("/", Some(&root), None);
        builder.locale("/zh/", Some(&zh), None);
        builder.build().unwrap()
    }

    #[test]
    fn test_select_locale_by_prefix() {
        let nav = navigation();

        assert_eq!(select_locale(&nav, "/zh/").unwrap().prefix(), "/zh/");
        assert_eq!(select_locale(&nav, "/").unwrap().prefix(), "/");
    }

    #[test]
    fn test_select_locale_by_path() {
        let nav = navigation();

        assert_eq!(select_locale(&nav, "/zh/guide").unwrap().prefix(), "/zh/");
        assert_eq!(select_locale(&nav, "/zh").unwrap().prefix(), "/zh/");
        assert_eq!(select_locale(&nav, "/guide").unwrap().prefix(), "/");
    }
}
