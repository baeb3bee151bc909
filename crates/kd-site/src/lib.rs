//! Page rendering and site assembly for KD.
//!
//! [`Site`] ties a [`Storage`](kd_storage::Storage) backend to the SEO
//! assemblers in `kd_seo`:
//!
//! - documentation pages with breadcrumbs, Article and BreadcrumbList
//!   records and head metadata ([`Site::render`], [`Site::render_html`])
//! - the home, showcase and sponsors pages
//! - plain-text exports for language models ([`Site::llm_text`],
//!   [`Site::llms_full`])
//! - sitemap, robots.txt and title/description search
//! - static export of all of the above ([`StaticSiteBuilder`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kd_site::{Site, SiteConfig};
//! use kd_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new("content/docs".into()));
//! let site = Site::new(storage, SiteConfig::default());
//!
//! let page = site.render("getting-started")?;
//! println!("{} ({} breadcrumbs)", page.title, page.breadcrumbs.len());
//! ```

mod builder;
mod content;
mod markdown;
mod page;
mod site;
mod template;

pub use builder::{BuildError, BuildSummary, StaticSiteBuilder};
pub use content::ContentIndex;
pub use markdown::TocEntry;
pub use page::{PageRenderResult, RenderError};
pub use site::{SearchHit, Site, SiteConfig};
