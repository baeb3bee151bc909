//! `kd build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use kd_config::{CliSettings, Config};
use kd_site::{Site, SiteConfig, StaticSiteBuilder};
use kd_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Public base URL used in canonical links and structured data
    /// (overrides config).
    #[arg(long, env = "KD_BASE_URL")]
    base_url: Option<String>,

    /// Path to configuration file (default: auto-discover kd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a page cannot be exported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            base_url: self.base_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let output_dir = config.docs_resolved.output_dir.clone();

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", output_dir.display()));

        let storage = Arc::new(FsStorage::new(config.docs_resolved.source_dir.clone()));
        let site = Site::new(
            storage,
            SiteConfig {
                identity: config.site,
                showcase: config.showcase,
                sponsors: config.sponsors,
            },
        );

        let summary = StaticSiteBuilder::new(&site).build(&output_dir)?;

        output.success(&format!(
            "Exported {} pages ({} files) to {}",
            summary.pages,
            summary.files,
            output_dir.display()
        ));
        Ok(())
    }
}
