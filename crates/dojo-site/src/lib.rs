//! Site assembly for dojo.
//!
//! Turns a loaded [`dojo_config::Config`] into an immutable [`Site`]: the
//! validated redirect table, the per-locale navigation, and the settings
//! passed through to the theme and plugins. Building the site is the single
//! place where configuration errors surface; nothing is validated lazily.
//!
//! The [`ContentIndex`] and [`Site::check`] add a build-time pass that finds
//! navigation links and redirect targets with no page behind them.

mod check;
mod content;
mod site;

pub use check::{DeadLink, check_links, check_redirects};
pub use content::ContentIndex;
pub use site::{LocaleInfo, Site, SiteError, SiteInfo, ThemeInfo};
