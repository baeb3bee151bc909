//! Configuration management for KD.
//!
//! Parses `kd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
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
//! - `site.base_url`
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [docs]
//! source_dir = "content/docs"
//! output_dir = "dist"
//!
//! [site]
//! base_url = "${KD_BASE_URL:-https://keyloom.dev}"
//! ```

mod expand;
mod listing;

use std::path::{Path, PathBuf};

use kd_seo::SiteIdentity;
use serde::Deserialize;

pub use listing::{ShowcaseItem, SponsorItem, SponsorTier, sort_by_tier};

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
    /// Override static export directory.
    pub output_dir: Option<PathBuf>,
    /// Override site base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "kd.toml";

/// Paths served by fixed routes; everything under `/docs/` is taken too.
const RESERVED_PATHS: [&str; 8] = [
    "/",
    "/docs",
    "/docs.mdx",
    "/showcase",
    "/sponsors",
    "/sitemap.xml",
    "/robots.txt",
    "/llms-full.txt",
];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Site identity used for structured data and SEO tags.
    pub site: SiteIdentity,
    /// Projects featured on the showcase page.
    pub showcase: Vec<ShowcaseItem>,
    /// Sponsors listed on the sponsors page.
    pub sponsors: Vec<SponsorItem>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
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
            port: 3000,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown/MDX files.
    pub source_dir: PathBuf,
    /// Output directory for `kd build`.
    pub output_dir: PathBuf,
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
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`KD_BASE_URL`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `kd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            config.normalize();
            config.validate()?;
        }

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
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url.clone_from(base_url);
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
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            site: SiteIdentity::default(),
            showcase: Vec::new(),
            sponsors: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("content").join("docs"),
                output_dir: base.join("dist"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());
        config.normalize();

        config.validate()?;

        Ok(config)
    }

    /// Strip the trailing slash from the base URL so that joining it with
    /// site-relative paths yields a single slash.
    fn normalize(&mut self) {
        let trimmed = self.site.base_url.trim_end_matches('/').len();
        self.site.base_url.truncate(trimmed);
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_site()?;
        self.validate_listings()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate site identity.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_url, "site.base_url")?;
        require_http_url(&self.site.base_url, "site.base_url")?;
        require_non_empty(&self.site.organization, "site.organization")?;
        require_non_empty(&self.site.site_name, "site.site_name")?;

        let search_path = &self.site.search_path;
        if !search_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.search_path must start with /".to_owned(),
            ));
        }
        if search_path.contains(['{', '}', '*']) {
            return Err(ConfigError::Validation(
                "site.search_path cannot contain route parameters".to_owned(),
            ));
        }
        if RESERVED_PATHS.contains(&search_path.as_str()) || search_path.starts_with("/docs/") {
            return Err(ConfigError::Validation(format!(
                "site.search_path {search_path} is already served by the site"
            )));
        }

        Ok(())
    }

    /// Validate showcase and sponsor entries.
    fn validate_listings(&self) -> Result<(), ConfigError> {
        for (i, item) in self.showcase.iter().enumerate() {
            require_non_empty(&item.name, &format!("showcase[{i}].name"))?;
            require_http_url(&item.url, &format!("showcase[{i}].url"))?;
        }
        for (i, item) in self.sponsors.iter().enumerate() {
            require_non_empty(&item.name, &format!("sponsors[{i}].name"))?;
            require_http_url(&item.url, &format!("sponsors[{i}].url"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "content/docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "dist"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/test/content/docs")
        );
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/test/dist"));
        assert_eq!(config.site, SiteIdentity::default());
        assert!(config.showcase.is_empty());
        assert!(config.sponsors.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.site.organization, "Keyloom");
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
base_url = "https://keyloom.dev"
organization = "Keyloom"
knows_about = ["Authentication"]

[site.software]
version = "2.1.0"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.base_url, "https://keyloom.dev");
        assert_eq!(config.site.knows_about, vec!["Authentication".to_owned()]);
        assert_eq!(config.site.software.version, "2.1.0");
        assert_eq!(config.site.software.category, "DeveloperApplication");
    }

    #[test]
    fn test_parse_listings() {
        let toml = r#"
[[showcase]]
name = "Acme Portal"
description = "Customer portal"
url = "https://portal.acme.dev"
tags = ["Next.js", "Prisma"]

[[sponsors]]
name = "Example Corp"
description = "Gold sponsor"
url = "https://example-corp.com"
tier = "gold"

[[sponsors]]
name = "Friend"
description = "Individual supporter"
url = "https://friend.dev"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.showcase.len(), 1);
        assert_eq!(config.showcase[0].tags, vec!["Next.js", "Prisma"]);
        assert!(config.showcase[0].image.is_none());
        assert_eq!(config.sponsors.len(), 2);
        assert_eq!(config.sponsors[0].tier, Some(SponsorTier::Gold));
        assert_eq!(config.sponsors[1].tier, None);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
output_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/public")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kd.toml");
        std::fs::write(
            &path,
            "[site]\nbase_url = \"https://keyloom.dev/\"\n\n[server]\nport = 8080\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.base_url, "https://keyloom.dev");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content/docs"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/kd.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kd.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_expands_env_vars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kd.toml");
        std::fs::write(
            &path,
            "[site]\nbase_url = \"${KD_TEST_LOAD_URL:-https://fallback.dev}\"\n",
        )
        .unwrap();
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("KD_TEST_LOAD_URL");
        }

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.base_url, "https://fallback.dev");
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
        assert_eq!(config.server.port, 3000); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            port: Some(9000),
            source_dir: Some(PathBuf::from("/custom/docs")),
            output_dir: Some(PathBuf::from("/custom/out")),
            base_url: Some("http://localhost:9000".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/custom/out"));
        assert_eq!(config.site.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "https://keyloom.dev//".to_owned();

        config.normalize();

        assert_eq!(config.site.base_url, "https://keyloom.dev");
    }

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for substring in expected_substrings {
            assert!(msg.contains(substring), "{msg:?} should contain {substring:?}");
        }
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
        assert_validation_error(&config, &["server.host", "cannot be empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port", "cannot be 0"]);
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "keyloom.dev".to_owned();
        assert_validation_error(&config, &["site.base_url", "http://"]);
    }

    #[test]
    fn test_validate_search_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.search_path = "api/search".to_owned();
        assert_validation_error(&config, &["site.search_path"]);

        for taken in [
            "/",
            "/docs",
            "/docs/search",
            "/sitemap.xml",
            "/robots.txt",
            "/llms-full.txt",
            "/showcase",
            "/api/{query}",
        ] {
            config.site.search_path = taken.to_owned();
            assert_validation_error(&config, &["site.search_path"]);
        }

        config.site.search_path = "/api/docs-search".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_sponsor_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.sponsors.push(SponsorItem {
            name: "Example".to_owned(),
            description: String::new(),
            url: "example.com".to_owned(),
            logo: None,
            tier: None,
        });
        assert_validation_error(&config, &["sponsors[0].url"]);
    }

    #[test]
    fn test_validate_showcase_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.showcase.push(ShowcaseItem {
            name: String::new(),
            description: String::new(),
            url: "https://example.com".to_owned(),
            image: None,
            tags: Vec::new(),
        });
        assert_validation_error(&config, &["showcase[0].name"]);
    }
}
