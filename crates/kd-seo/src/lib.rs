//! Breadcrumbs, structured data and SEO metadata for KD.
//!
//! This crate provides the search-engine facing part of the documentation
//! site:
//! - [`breadcrumbs`]: slug segments to a breadcrumb trail
//! - [`schema`]: schema.org records (Organization, WebSite, Article,
//!   BreadcrumbList, SoftwareApplication) serialised as JSON-LD
//! - [`SeoMetadata`]: canonical URL, robots, Open Graph and Twitter values
//! - [`render_scripts`]: inline `<script type="application/ld+json">` blocks
//! - [`sitemap`]: sitemaps.org XML
//!
//! All assemblers are pure. Site-wide values come from a [`SiteIdentity`]
//! and the current instant from a [`Clock`], both passed in explicitly.
//!
//! # Example
//!
//! ```
//! use kd_seo::{ArticleInput, FixedClock, JsonLd, SiteIdentity, breadcrumbs, schema};
//!
//! let identity = SiteIdentity::default();
//! let clock = FixedClock::new("2025-01-01T00:00:00.000Z");
//!
//! let trail = breadcrumbs(&["getting-started"]);
//! let article = schema::article(
//!     &identity,
//!     &ArticleInput {
//!         title: "Getting Started",
//!         description: "Install and configure",
//!         url: "/docs/getting-started",
//!         ..Default::default()
//!     },
//!     &clock,
//! );
//!
//! let records = [JsonLd::from(article), JsonLd::from(schema::breadcrumb_list(&identity, &trail))];
//! let html = kd_seo::render_scripts(&records).unwrap();
//! assert!(html.contains("application/ld+json"));
//! ```

mod breadcrumb;
mod clock;
mod html;
mod identity;
mod metadata;
pub mod schema;
mod script;
pub mod sitemap;

pub use breadcrumb::{Breadcrumb, PageSlug, breadcrumbs, capitalize_first, humanize_segment};
pub use clock::{Clock, FixedClock, SystemClock};
pub use html::escape_html;
pub use identity::{SiteIdentity, SoftwareInfo};
pub use metadata::{SeoInput, SeoMetadata};
pub use schema::{ArticleInput, JsonLd, StructuredData};
pub use script::{render_scripts, to_json_ld};
