//! HTTP host for dojo sites.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - Redirects for legacy paths, installed in one batch in front of all routes
//! - API endpoints for site settings, navigation and the redirect table
//! - Static files produced by the site generator
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use dojo_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8080,
//!         dist_dir: PathBuf::from("dist"),
//!     };
//!
//!     run_server(config, site).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (dojo-server)
//!                        │
//!                        ├─► Redirect middleware ──► RedirectTable (one hop)
//!                        │
//!                        ├─► API routes ──► Site (settings + navigation)
//!                        │
//!                        └─► Static files (tower-http ServeDir)
//! ```

mod app;
mod error;
mod handlers;
mod redirect;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use dojo_site::Site;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Generated site directory.
    pub dist_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            dist_dir: PathBuf::from("dist"),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
/// * `site` - Site built from configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig, site: Site) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        site: Arc::new(site),
    });

    let app = app::create_router(state, &config.dist_dir);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from dojo config.
#[must_use]
pub fn server_config_from_dojo_config(config: &dojo_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        dist_dir: config.docs_resolved.dist_dir.clone(),
    }
}
