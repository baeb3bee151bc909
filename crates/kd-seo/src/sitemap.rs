//! Sitemap and robots.txt generation.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01T00:00:00.000Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::clock::Clock;
use crate::identity::SiteIdentity;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Pages outside the documentation tree, with their crawl hints.
const STATIC_PAGES: [(&str, ChangeFrequency, f32); 4] = [
    ("/", ChangeFrequency::Weekly, 1.0),
    ("/docs", ChangeFrequency::Weekly, 0.9),
    ("/showcase", ChangeFrequency::Monthly, 0.7),
    ("/sponsors", ChangeFrequency::Monthly, 0.6),
];

/// Priority of documentation pages.
const DOC_PAGE_PRIORITY: f32 = 0.8;

/// How often a page is expected to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// Sitemap protocol value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// Single URL entry in the sitemap.
#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub url: String,
    pub last_modified: String,
    pub change_frequency: ChangeFrequency,
    /// Relative priority between 0.0 and 1.0.
    pub priority: f32,
}

/// Collect sitemap entries: the static pages first, then `doc_urls`
/// (site-relative documentation page URLs) in the given order.
///
/// Every entry is stamped with the clock's current instant.
#[must_use]
pub fn entries<S: AsRef<str>>(
    identity: &SiteIdentity,
    doc_urls: &[S],
    clock: &dyn Clock,
) -> Vec<SitemapEntry> {
    let now = clock.now();

    let static_pages = STATIC_PAGES
        .iter()
        .map(|&(path, change_frequency, priority)| SitemapEntry {
            url: identity.absolute(path),
            last_modified: now.clone(),
            change_frequency,
            priority,
        });

    let doc_pages = doc_urls.iter().map(|url| SitemapEntry {
        url: identity.absolute(url.as_ref()),
        last_modified: now.clone(),
        change_frequency: ChangeFrequency::Weekly,
        priority: DOC_PAGE_PRIORITY,
    });

    static_pages.chain(doc_pages).collect()
}

/// Render entries as sitemap XML.
///
/// # Errors
///
/// Returns an error if the XML writer fails.
pub fn render(entries: &[SitemapEntry]) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|writer| {
            for entry in entries {
                writer
                    .create_element("url")
                    .write_inner_content(|writer| write_entry(writer, entry))?;
            }
            Ok(())
        })?;

    String::from_utf8(writer.into_inner()).map_err(io::Error::other)
}

fn write_entry(writer: &mut Writer<Vec<u8>>, entry: &SitemapEntry) -> io::Result<()> {
    let priority = format!("{:.1}", entry.priority);
    writer
        .create_element("loc")
        .write_text_content(BytesText::new(&entry.url))?;
    writer
        .create_element("lastmod")
        .write_text_content(BytesText::new(&entry.last_modified))?;
    writer
        .create_element("changefreq")
        .write_text_content(BytesText::new(entry.change_frequency.as_str()))?;
    writer
        .create_element("priority")
        .write_text_content(BytesText::new(&priority))?;
    Ok(())
}

/// `robots.txt` allowing all crawlers and pointing at the sitemap.
#[must_use]
pub fn robots_txt(identity: &SiteIdentity) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        identity.absolute("/sitemap.xml")
    )
}
