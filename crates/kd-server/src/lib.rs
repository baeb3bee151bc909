//! HTTP server for the KD documentation site.
//!
//! Serves the rendered site with axum:
//! - documentation pages under `/docs`, with `.mdx` plain-text exports
//! - the home, showcase and sponsors pages
//! - `sitemap.xml`, `robots.txt` and `llms-full.txt`
//! - the search endpoint targeted by the WebSite `SearchAction`
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use kd_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("content/docs"),
//!         ..Default::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use kd_site::{Site, SiteConfig};
use kd_storage::FsStorage;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub source_dir: PathBuf,
    /// Site identity and listings.
    pub site: SiteConfig,
    /// Application version (for `ETag` invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            source_dir: PathBuf::from("content/docs"),
            site: SiteConfig::default(),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Arc::new(FsStorage::new(config.source_dir.clone()));
    let site = Arc::new(Site::new(storage, config.site));

    let pages = site.reload()?.len();
    tracing::info!(pages, source_dir = %config.source_dir.display(), "Content loaded");

    let state = Arc::new(AppState {
        site,
        version: config.version,
    });
    let app = app::create_router(state);

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
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded `kd.toml`.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &kd_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        site: SiteConfig {
            identity: config.site.clone(),
            showcase: config.showcase.clone(),
            sponsors: config.sponsors.clone(),
        },
        version,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let mut config = kd_config::Config::default();
        config.server.port = 4000;
        config.docs_resolved.source_dir = PathBuf::from("/srv/docs");

        let server = server_config_from_config(&config, "0.1.0".to_owned());

        assert_eq!(server.port, 4000);
        assert_eq!(server.source_dir, PathBuf::from("/srv/docs"));
        assert_eq!(server.site.identity, config.site);
        assert_eq!(server.version, "0.1.0");
    }
}
