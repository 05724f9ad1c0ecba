//! Configuration management for dojo sites.
//!
//! Parses `dojo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Sections
//!
//! - `[site]`: language, title, description and base path
//! - `[server]`: host and port of the preview server
//! - `[docs]`: markdown source directory and generated site directory
//! - `[theme]`: theme options, default navbar/sidebar and per-locale overrides
//! - `[redirects]`: ordered redirect rules and their duplicate policy
//! - `[plugins.*]`: opaque tables handed to search, analytics, feed and
//!   highlighter plugins unchanged
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - every string inside `[plugins]`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dojo_nav::NavEntry;
use dojo_redirects::{DuplicatePolicy, RedirectEntry};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override generated site directory.
    pub dist_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dojo.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Theme options and navigation.
    pub theme: ThemeConfig,
    /// Redirect rules.
    pub redirects: RedirectsConfig,
    /// Plugin settings, passed through unchanged.
    pub plugins: toml::Table,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Language tag of the default locale.
    pub lang: String,
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Base path the site is deployed under.
    pub base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_owned(),
            title: String::new(),
            description: String::new(),
            base: "/".to_owned(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    dist_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Markdown sources, used for link validation.
    pub source_dir: PathBuf,
    /// Output of the site generator, served as static files.
    pub dist_dir: PathBuf,
}

/// Theme options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Logo image path.
    pub logo: Option<String>,
    /// Repository shown in the navbar (`owner/name` or URL).
    pub repo: Option<String>,
    /// Label of the repository link.
    pub repo_label: Option<String>,
    /// Repository holding the docs, for "edit this page" links.
    pub docs_repo: Option<String>,
    /// Branch of the docs repository.
    pub docs_branch: Option<String>,
    /// Directory of the docs inside the docs repository.
    pub docs_dir: Option<String>,
    /// Whether pages show their last update time.
    pub last_updated: Option<bool>,
    /// Default navbar.
    pub navbar: Vec<NavEntry>,
    /// Default sidebar.
    pub sidebar: Vec<NavEntry>,
    /// Per-locale options keyed by path prefix (`/`, `/zh/`), sorted by
    /// prefix.
    pub locales: BTreeMap<String, LocaleConfig>,
}

/// Options of one locale.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Name of the language in the language picker.
    pub select_language_name: Option<String>,
    /// Text of the "edit this page" link.
    pub edit_link_text: Option<String>,
    /// Navbar of this locale (inherits the theme navbar when absent).
    pub navbar: Option<Vec<NavEntry>>,
    /// Sidebar of this locale (inherits the theme sidebar when absent).
    pub sidebar: Option<Vec<NavEntry>>,
}

/// Redirect configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// How repeated source paths are handled.
    pub duplicates: DuplicatePolicy,
    /// HTTP status used by the server.
    pub status: RedirectStatus,
    /// Rules in declaration order.
    pub rules: Vec<RedirectEntry>,
}

/// HTTP status the server answers redirects with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectStatus {
    /// 307 Temporary Redirect.
    #[default]
    Temporary,
    /// 308 Permanent Redirect.
    Permanent,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`plugins.search.api_key`").
        field: String,
        /// Error message (e.g., "${`SEARCH_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dojo.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Paths are resolved against `base`. No file is read.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(dist_dir) = &settings.dist_dir {
            self.docs_resolved.dist_dir.clone_from(dist_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            theme: ThemeConfig::default(),
            redirects: RedirectsConfig::default(),
            plugins: toml::Table::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                dist_dir: base.join("dist"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks scalar settings only. Redirect rules and navigation entries are
    /// validated when the site is assembled from them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_server()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.lang, "site.lang")?;
        if !self.site.base.starts_with('/') || !self.site.base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base must start and end with '/'".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 lets the OS pick a port, which is never what a config file means
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        for (name, value) in self.plugins.iter_mut() {
            expand::expand_value(value, &format!("plugins.{name}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            dist_dir: resolve(self.docs.dist_dir.as_deref(), "dist"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.site.lang, "en-US");
        assert_eq!(config.site.base, "/");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.dist_dir, PathBuf::from("/test/dist"));
        assert!(config.redirects.rules.is_empty());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.redirects.duplicates, DuplicatePolicy::LastWins);
        assert_eq!(config.redirects.status, RedirectStatus::Temporary);
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
lang = "en-US"
title = "Mojo Dojo"
description = "Learning Resources for 🔥"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Mojo Dojo");
        assert_eq!(config.site.description, "Learning Resources for 🔥");
        assert_eq!(config.site.base, "/");
    }

    #[test]
    fn test_parse_theme_config() {
        let toml = r#"
[theme]
logo = "/hero.png"
repo = "mojodojodev/mojodojo.github.dev"
repo_label = "GitHub"
docs_repo = "mojodojodev/mojodojo.github.dev"
docs_branch = "main"
last_updated = false

[theme.locales."/"]
select_language_name = "English"
edit_link_text = "Edit this page on GitHub"
navbar = [
    { text = "Chris Lattner FAQ", link = "/general/chris_faqs" },
]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.logo.as_deref(), Some("/hero.png"));
        assert_eq!(config.theme.repo_label.as_deref(), Some("GitHub"));
        assert_eq!(config.theme.last_updated, Some(false));
        let root = &config.theme.locales["/"];
        assert_eq!(root.select_language_name.as_deref(), Some("English"));
        assert_eq!(
            root.navbar.as_deref(),
            Some(&[NavEntry::link("Chris Lattner FAQ", "/general/chris_faqs")][..])
        );
        assert!(root.sidebar.is_none());
    }

    #[test]
    fn test_parse_redirects_keeps_order() {
        let toml = r#"
[redirects]
duplicates = "reject"
status = "permanent"

[[redirects.rules]]
from = "/general/mojo_team_answers"
to = "/mojo_team_answers"

[[redirects.rules]]
from = "/general/mojo_team_answers"
to = "/blog"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.redirects.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.redirects.status, RedirectStatus::Permanent);
        assert_eq!(
            config.redirects.rules,
            vec![
                RedirectEntry::new("/general/mojo_team_answers", "/mojo_team_answers"),
                RedirectEntry::new("/general/mojo_team_answers", "/blog"),
            ]
        );
    }

    #[test]
    fn test_parse_unknown_duplicate_policy_fails() {
        let toml = r#"
[redirects]
duplicates = "first-wins"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_plugins_passthrough() {
        let toml = r#"
[plugins.search]
app_id = "ABC"
index_name = "mojodojo"

[plugins.feed]
hostname = "https://mojodojo.dev"
rss = true
count = 20
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins["search"]["index_name"].as_str(), Some("mojodojo"));
        assert_eq!(config.plugins["feed"]["rss"].as_bool(), Some(true));
        assert_eq!(config.plugins["feed"]["count"].as_integer(), Some(20));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "content"
dist_dir = "content/.vuepress/dist"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(
            config.docs_resolved.dist_dir,
            PathBuf::from("/project/content/.vuepress/dist")
        );
    }

    #[test]
    fn test_apply_cli_settings_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            port: Some(9000),
            source_dir: Some(PathBuf::from("/custom/docs")),
            dist_dir: Some(PathBuf::from("/custom/dist")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.docs_resolved.dist_dir, PathBuf::from("/custom/dist"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_expand_env_vars_server_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOJO_TEST_HOST", "0.0.0.0");
        }
        let toml = r#"
[server]
host = "${DOJO_TEST_HOST}"
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        unsafe {
            std::env::remove_var("DOJO_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_plugins() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOJO_TEST_SEARCH_KEY", "secret-key");
        }
        let toml = r#"
[plugins.search]
api_key = "${DOJO_TEST_SEARCH_KEY}"
index_name = "mojodojo"
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        assert_eq!(
            config.plugins["search"]["api_key"].as_str(),
            Some("secret-key")
        );
        assert_eq!(
            config.plugins["search"]["index_name"].as_str(),
            Some("mojodojo")
        );
        unsafe {
            std::env::remove_var("DOJO_TEST_SEARCH_KEY");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_plugin_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOJO_TEST_MISSING_KEY");
        }
        let toml = r#"
[plugins.analytics]
id = "${DOJO_TEST_MISSING_KEY}"
"#;
        let err = Config::from_toml(toml, Path::new("/project")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }), "got {err:?}");
        assert!(err.to_string().contains("plugins.analytics.id"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_site_base() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base = "/docs".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.base"));

        config.site.base = "/docs/".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/dojo.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
title = "Mojo Dojo"

[docs]
source_dir = "src"
"#,
        )
        .unwrap();

        let settings = CliSettings {
            port: Some(4000),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.site.title, "Mojo Dojo");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.docs_resolved.source_dir, temp_dir.path().join("src"));
        assert_eq!(config.docs_resolved.dist_dir, temp_dir.path().join("dist"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_from_file_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = 1").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }
}
