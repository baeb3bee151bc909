//! Documentation page assembly.
//!
//! Turns a resolved [`Document`] and its Markdown body into a
//! [`PageRenderResult`]: rendered HTML, table of contents, breadcrumbs,
//! SEO metadata and the Article + BreadcrumbList records.

use kd_seo::schema::{self, DEFAULT_SECTION};
use kd_seo::{
    ArticleInput, Breadcrumb, Clock, JsonLd, PageSlug, SeoInput, SeoMetadata, SiteIdentity,
    capitalize_first,
};
use kd_storage::{Document, StorageError};

use crate::markdown::{TocEntry, render_markdown};

/// Result of rendering a documentation page.
#[derive(Clone, Debug)]
pub struct PageRenderResult {
    /// Page title.
    pub title: String,
    /// Page description (the site description when the page has none).
    pub description: String,
    /// Site-relative URL.
    pub url: String,
    /// Rendered body HTML.
    pub html: String,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
    /// Breadcrumb trail.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Article and BreadcrumbList records, in embedding order.
    pub structured_data: Vec<JsonLd>,
    /// Head metadata.
    pub seo: SeoMetadata,
    /// Render without the table of contents column.
    pub full: bool,
    /// Source modification time (Unix timestamp, 0 when unknown).
    pub source_mtime: f64,
}

/// Error returned when rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Page not found in the content index.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Structured data serialization failure.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// Sitemap XML writer failure.
    #[error("Sitemap error: {0}")]
    Sitemap(#[source] std::io::Error),
}

/// Article section: explicit front matter section, else the first slug
/// segment with its first character upper-cased, else `Documentation`.
pub(crate) fn page_section(doc: &Document, slug: &PageSlug) -> String {
    doc.section
        .clone()
        .or_else(|| slug.first().map(capitalize_first))
        .unwrap_or_else(|| DEFAULT_SECTION.to_owned())
}

/// Assemble a rendered page from its metadata and body.
pub(crate) fn assemble(
    identity: &SiteIdentity,
    clock: &dyn Clock,
    slug: &PageSlug,
    doc: &Document,
    body: &str,
) -> PageRenderResult {
    let rendered = render_markdown(body);
    let url = slug.url();
    let section = page_section(doc, slug);
    let description = doc
        .description
        .clone()
        .unwrap_or_else(|| identity.site_description.clone());
    let breadcrumbs = slug.breadcrumbs();

    let article = schema::article(
        identity,
        &ArticleInput {
            title: &doc.title,
            description: &description,
            url: &url,
            date_published: doc.published.as_deref(),
            date_modified: doc.modified.as_deref(),
            section: Some(section.as_str()),
        },
        clock,
    );
    let breadcrumb_list = schema::breadcrumb_list(identity, &breadcrumbs);

    let seo = SeoMetadata::new(
        identity,
        &SeoInput {
            title: &doc.title,
            description: &description,
            url: &url,
            section: Some(section.as_str()),
            image: None,
            published_time: doc.published.as_deref(),
            modified_time: doc.modified.as_deref(),
            authors: Vec::new(),
            keywords: doc.keywords.clone(),
            no_index: doc.no_index,
        },
        clock,
    );

    PageRenderResult {
        title: doc.title.clone(),
        description,
        url,
        html: rendered.html,
        toc: rendered.toc,
        breadcrumbs,
        structured_data: vec![JsonLd::from(article), JsonLd::from(breadcrumb_list)],
        seo,
        full: doc.full,
        source_mtime: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use kd_seo::{FixedClock, StructuredData};
    use pretty_assertions::assert_eq;

    use super::*;

    const NOW: &str = "2025-03-01T10:00:00.000Z";

    fn doc(path: &str) -> Document {
        Document {
            path: path.to_owned(),
            title: "OAuth Providers".to_owned(),
            description: Some("Configure sign-in".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn test_page_section_explicit() {
        let doc = Document {
            section: Some("Guides".to_owned()),
            ..doc("guides/oauth")
        };
        assert_eq!(page_section(&doc, &PageSlug::parse("guides/oauth")), "Guides");
    }

    #[test]
    fn test_page_section_from_first_segment() {
        let slug = PageSlug::parse("getting-started/install");
        assert_eq!(page_section(&doc("getting-started/install"), &slug), "Getting-started");
    }

    #[test]
    fn test_page_section_default() {
        assert_eq!(page_section(&doc(""), &PageSlug::parse("")), "Documentation");
    }

    #[test]
    fn test_assemble_records() {
        let identity = SiteIdentity::default();
        let slug = PageSlug::parse("guides/oauth");

        let page = assemble(
            &identity,
            &FixedClock::new(NOW),
            &slug,
            &doc("guides/oauth"),
            "## Setup\n\nText.",
        );

        assert_eq!(page.url, "/docs/guides/oauth");
        assert_eq!(page.breadcrumbs.len(), 4);
        assert_eq!(page.toc.len(), 1);

        let types: Vec<&str> = page
            .structured_data
            .iter()
            .map(|r| r.data().schema_type())
            .collect();
        assert_eq!(types, vec!["Article", "BreadcrumbList"]);

        let StructuredData::Article(article) = page.structured_data[0].data() else {
            panic!("expected article");
        };
        assert_eq!(article.headline, "OAuth Providers");
        assert_eq!(article.url, "https://keyloom.markdegraaff.com/docs/guides/oauth");
        assert_eq!(article.article_section, "Guides");
        assert_eq!(article.date_published, NOW);

        assert_eq!(page.seo.canonical, article.url);
        assert_eq!(page.seo.category, "Guides");
    }

    #[test]
    fn test_assemble_description_fallback() {
        let identity = SiteIdentity::default();
        let doc = Document {
            description: None,
            ..doc("installation")
        };

        let page = assemble(
            &identity,
            &FixedClock::new(NOW),
            &PageSlug::parse("installation"),
            &doc,
            "",
        );

        assert_eq!(page.description, identity.site_description);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let identity = SiteIdentity::default();
        let clock = FixedClock::new(NOW);
        let slug = PageSlug::parse("guides/oauth");

        let a = assemble(&identity, &clock, &slug, &doc("guides/oauth"), "Body");
        let b = assemble(&identity, &clock, &slug, &doc("guides/oauth"), "Body");

        assert_eq!(a.structured_data, b.structured_data);
        assert_eq!(a.seo, b.seo);
    }
}
