//! `dojo serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use dojo_config::CliSettings;
use dojo_server::{run_server, server_config_from_dojo_config};
use dojo_site::ContentIndex;

use super::load_site;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover dojo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Generated site directory (overrides config).
    #[arg(short, long)]
    dist_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: None,
            dist_dir: self.dist_dir,
        };
        let (config, site) = load_site(self.config.as_deref(), Some(&cli_settings))?;

        // Dead links are reported but never stop the server
        let source_dir = &config.docs_resolved.source_dir;
        if source_dir.is_dir() {
            let content = ContentIndex::scan(source_dir);
            for dead in site.check(&content) {
                tracing::warn!(at = %dead.at, path = %dead.path, "Dead link");
            }
        }

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Site directory: {}",
            config.docs_resolved.dist_dir.display()
        ));
        output.info(&format!(
            "Redirects: {} ({:?})",
            site.redirects().len(),
            site.redirect_status()
        ));

        let server_config = server_config_from_dojo_config(&config);
        let runtime = tokio::runtime::Runtime::new()?;
        runtime
            .block_on(run_server(server_config, site))
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
