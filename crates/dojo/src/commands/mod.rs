//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod resolve;
pub(crate) mod serve;

use std::path::Path;

use dojo_config::{CliSettings, Config};
use dojo_site::Site;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use serve::ServeArgs;

use crate::error::CliError;

/// Load configuration and build the site from it.
fn load_site(
    config_path: Option<&Path>,
    cli_settings: Option<&CliSettings>,
) -> Result<(Config, Site), CliError> {
    let config = Config::load(config_path, cli_settings)?;
    let site = Site::from_config(&config)?;
    Ok((config, site))
}
