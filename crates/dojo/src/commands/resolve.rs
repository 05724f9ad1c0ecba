//! `dojo resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use dojo_redirects::RedirectTable;

use super::load_site;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Request path to resolve, e.g. `/general/mojo_team_answers`.
    path: String,

    /// Follow the redirect chain to its end.
    #[arg(long)]
    follow: bool,

    /// Path to configuration file (default: auto-discover dojo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (_, site) = load_site(self.config.as_deref(), None)?;
        Output::new().result(&describe(site.redirects(), &self.path, self.follow));
        Ok(())
    }
}

fn describe(redirects: &RedirectTable, path: &str, follow: bool) -> String {
    if follow {
        let chain = redirects.trace(path);
        if chain.len() > 1 {
            return chain.join(" -> ");
        }
    } else if let Some(target) = redirects.resolve(path) {
        return format!("{path} -> {target}");
    }
    format!("{path}: no redirect")
}
