//! `dojo check` command implementation.

use std::path::PathBuf;

use clap::Args;
use dojo_config::CliSettings;
use dojo_redirects::Shadowed;
use dojo_site::{ContentIndex, DeadLink};

use super::load_site;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover dojo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Also fail on redirects shadowed by a later rule.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, if any link is dead, or
    /// in strict mode if any redirect is shadowed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let (config, site) = load_site(self.config.as_deref(), Some(&cli_settings))?;

        let shadowed: Vec<_> = site.redirects().shadowed().collect();
        output.info(&format!(
            "Redirects: {} rules, {} shadowed",
            site.redirects().len(),
            shadowed.len()
        ));
        for entry in &shadowed {
            output.warning(&format!("  {}", describe_shadowed(entry)));
        }

        let navigation = site.navigation();
        let links: usize = navigation.locales().iter().map(|l| l.links().len()).sum();
        output.info(&format!(
            "Navigation: {} locales, {links} links",
            navigation.locales().len()
        ));

        let source_dir = &config.docs_resolved.source_dir;
        let dead = if source_dir.is_dir() {
            let content = ContentIndex::scan(source_dir);
            output.info(&format!(
                "Content: {} pages in {}",
                content.len(),
                source_dir.display()
            ));
            site.check(&content)
        } else {
            output.warning(&format!(
                "Source directory {} not found, skipping link check",
                source_dir.display()
            ));
            Vec::new()
        };
        for link in &dead {
            output.error(&format!("  {}", describe_dead(link)));
        }

        check_outcome(dead.len(), shadowed.len(), self.strict)?;
        output.success("No problems found");
        Ok(())
    }
}

fn describe_shadowed(shadowed: &Shadowed<'_>) -> String {
    if shadowed.is_conflict() {
        format!(
            "{} -> {} is shadowed by {} -> {}",
            shadowed.entry.from, shadowed.entry.to, shadowed.winner.from, shadowed.winner.to
        )
    } else {
        format!(
            "{} -> {} is declared more than once",
            shadowed.entry.from, shadowed.entry.to
        )
    }
}

fn describe_dead(link: &DeadLink) -> String {
    match &link.text {
        Some(text) => format!("{} ({text}): {} has no page", link.at, link.path),
        None => format!("{}: {} has no page", link.at, link.path),
    }
}

/// Decide the exit status from the problem counts.
fn check_outcome(dead: usize, shadowed: usize, strict: bool) -> Result<(), CliError> {
    if dead > 0 {
        return Err(CliError::Validation(format!("{dead} dead link(s)")));
    }
    if strict && shadowed > 0 {
        return Err(CliError::Validation(format!(
            "{shadowed} shadowed redirect(s)"
        )));
    }
    Ok(())
}
