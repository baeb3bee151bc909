//! Site-wide identity values.
//!
//! Every structured-data record and SEO tag is built from a [`SiteIdentity`]
//! rather than from module constants. The `[site]` section of `kd.toml`
//! deserialises into this type; omitted fields keep their defaults.

use serde::Deserialize;

/// Site-wide values shared by all generated records.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteIdentity {
    /// Absolute base URL without trailing slash.
    pub base_url: String,
    /// Organization (and product) name.
    pub organization: String,
    /// Author name used on articles and software records.
    pub author: String,
    /// Name of the documentation website.
    pub site_name: String,
    /// Organization description.
    pub description: String,
    /// Documentation website description.
    pub site_description: String,
    /// Title used for the home page.
    pub default_title: String,
    /// Page title template; `%s` is replaced by the page title.
    pub title_template: String,
    /// Logo path relative to the base URL.
    pub logo: String,
    /// Banner image path relative to the base URL.
    pub banner: String,
    /// Profiles of the organization on other sites.
    pub same_as: Vec<String>,
    /// Founding year or date, passed through as written.
    pub founding_date: String,
    /// Topics the organization is known for.
    pub knows_about: Vec<String>,
    /// Content language (BCP 47).
    pub language: String,
    /// Open Graph locale.
    pub locale: String,
    /// Path of the search endpoint.
    pub search_path: String,
    /// Keywords added to every page.
    pub keywords: Vec<String>,
    /// Social media handle (e.g. `@keyloom`).
    pub social_handle: String,
    /// Source repository URL.
    pub repository_url: String,
    /// Software product descriptor.
    pub software: SoftwareInfo,
}

/// Descriptor of the documented software product.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SoftwareInfo {
    /// Short product description.
    pub description: String,
    /// schema.org application category.
    pub category: String,
    /// Supported operating systems label.
    pub operating_system: String,
    /// Current release.
    pub version: String,
    /// Package download page.
    pub download_url: String,
    /// Package install page.
    pub install_url: String,
    /// Capability names.
    pub features: Vec<String>,
}

impl SiteIdentity {
    /// Join the base URL with a site-relative path.
    ///
    /// The path is appended verbatim, so `"/docs"` becomes
    /// `"https://example.com/docs"` and `""` yields the base URL itself.
    #[must_use]
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Resolve an asset reference: relative paths are made absolute,
    /// absolute URLs are returned unchanged.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_owned()
        } else {
            self.absolute(reference)
        }
    }

    /// Format a page title with the title template.
    #[must_use]
    pub fn page_title(&self, title: &str) -> String {
        if self.title_template.contains("%s") {
            self.title_template.replace("%s", title)
        } else {
            title.to_owned()
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|&s| s.to_owned()).collect()
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            base_url: "https://keyloom.markdegraaff.com".to_owned(),
            organization: "Keyloom".to_owned(),
            author: "Keyloom Team".to_owned(),
            site_name: "Keyloom Documentation".to_owned(),
            description: "Modern, security-first authentication for JavaScript applications \
                          with comprehensive features and developer-friendly experience."
                .to_owned(),
            site_description: "Complete documentation for Keyloom - Modern authentication \
                               for JavaScript applications"
                .to_owned(),
            default_title: "Keyloom - Modern Authentication for JavaScript".to_owned(),
            title_template: "%s | Keyloom".to_owned(),
            logo: "/keyloom.png".to_owned(),
            banner: "/keyloom_banner.png".to_owned(),
            same_as: strings(&["https://github.com/m-de-graaff/keyloom"]),
            founding_date: "2024".to_owned(),
            knows_about: strings(&[
                "Authentication",
                "JavaScript",
                "TypeScript",
                "Next.js",
                "OAuth",
                "Security",
                "RBAC",
                "Session Management",
            ]),
            language: "en-US".to_owned(),
            locale: "en_US".to_owned(),
            search_path: "/api/search".to_owned(),
            keywords: strings(&[
                "authentication",
                "nextjs",
                "typescript",
                "oauth",
                "security",
                "rbac",
                "session management",
                "javascript",
                "react",
            ]),
            social_handle: "@keyloom".to_owned(),
            repository_url: "https://github.com/m-de-graaff/keyloom".to_owned(),
            software: SoftwareInfo::default(),
        }
    }
}

impl Default for SoftwareInfo {
    fn default() -> Self {
        Self {
            description: "Modern, security-first authentication for JavaScript applications"
                .to_owned(),
            category: "DeveloperApplication".to_owned(),
            operating_system: "Cross-platform".to_owned(),
            version: "1.0.0".to_owned(),
            download_url: "https://www.npmjs.com/package/@keyloom/core".to_owned(),
            install_url: "https://www.npmjs.com/package/@keyloom/core".to_owned(),
            features: strings(&[
                "OAuth Authentication",
                "Session Management",
                "Role-Based Access Control (RBAC)",
                "JWT Support",
                "Database Adapters",
                "Next.js Integration",
                "TypeScript Support",
            ]),
        }
    }
}
