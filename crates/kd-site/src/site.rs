//! Unified content loading and rendering.
//!
//! # Thread Safety
//!
//! `Site` is designed for concurrent access:
//! - `index()` returns `Arc<ContentIndex>` with minimal locking (just Arc clone)
//! - `reload_if_needed()` uses double-checked locking for the first load
//! - `invalidate()` is lock-free (atomic flag)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use kd_config::{ShowcaseItem, SponsorItem, sort_by_tier};
use kd_seo::{
    Clock, JsonLd, PageSlug, SeoInput, SeoMetadata, SiteIdentity, SystemClock, render_scripts,
    schema, sitemap,
};
use kd_storage::Storage;
use serde::Serialize;

use crate::content::ContentIndex;
use crate::markdown::strip_mdx_statements;
use crate::page::{PageRenderResult, RenderError, assemble};
use crate::template::{self, Shell};

/// Configuration for [`Site`].
#[derive(Clone, Debug, Default)]
pub struct SiteConfig {
    /// Site identity for SEO tags and structured data.
    pub identity: SiteIdentity,
    /// Projects listed on the showcase page.
    pub showcase: Vec<ShowcaseItem>,
    /// Sponsors listed on the sponsors page.
    pub sponsors: Vec<SponsorItem>,
}

/// Page matching a search query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub description: Option<String>,
    /// Site-relative URL.
    pub url: String,
}

/// Documentation site: content index, page rendering and the
/// non-documentation pages.
pub struct Site {
    storage: Arc<dyn Storage>,
    identity: SiteIdentity,
    showcase: Vec<ShowcaseItem>,
    /// Sponsors ordered by tier.
    sponsors: Vec<SponsorItem>,
    clock: Arc<dyn Clock>,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current content snapshot (atomically swappable).
    current: RwLock<Arc<ContentIndex>>,
    /// Snapshot validity flag.
    valid: AtomicBool,
}

impl Site {
    /// Create a site using the system clock.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: SiteConfig) -> Self {
        Self::with_clock(storage, config, Arc::new(SystemClock))
    }

    /// Create a site with an explicit clock for default timestamps.
    #[must_use]
    pub fn with_clock(storage: Arc<dyn Storage>, config: SiteConfig, clock: Arc<dyn Clock>) -> Self {
        let mut sponsors = config.sponsors;
        sort_by_tier(&mut sponsors);

        Self {
            storage,
            identity: config.identity,
            showcase: config.showcase,
            sponsors,
            clock,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(ContentIndex::default())),
            valid: AtomicBool::new(false),
        }
    }

    /// Site identity.
    #[must_use]
    pub fn identity(&self) -> &SiteIdentity {
        &self.identity
    }

    /// Current content snapshot, loading it first if needed.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    #[must_use]
    pub fn index(&self) -> Arc<ContentIndex> {
        self.reload_if_needed()
    }

    /// Rescan storage and swap in the new content snapshot.
    ///
    /// On error the previous snapshot stays in place.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Storage` if the scan fails.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload(&self) -> Result<Arc<ContentIndex>, RenderError> {
        let _guard = self.reload_lock.lock().unwrap();
        self.load()
    }

    /// Mark the snapshot stale. The next access rescans storage; current
    /// readers keep their existing `Arc<ContentIndex>`.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    fn reload_if_needed(&self) -> Arc<ContentIndex> {
        // Fast path: snapshot valid
        if self.valid.load(Ordering::Acquire) {
            return self.current.read().unwrap().clone();
        }

        let _guard = self.reload_lock.lock().unwrap();

        // Double-check after acquiring lock
        if self.valid.load(Ordering::Acquire) {
            return self.current.read().unwrap().clone();
        }

        match self.load() {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to scan content, keeping previous index");
                self.current.read().unwrap().clone()
            }
        }
    }

    /// Scan storage and publish the result. Caller holds `reload_lock`.
    fn load(&self) -> Result<Arc<ContentIndex>, RenderError> {
        let documents = self.storage.scan()?;
        let index = Arc::new(ContentIndex::new(documents));
        tracing::info!(pages = index.len(), "Loaded content index");

        *self.current.write().unwrap() = index.clone();
        self.valid.store(true, Ordering::Release);
        Ok(index)
    }

    /// Render a documentation page.
    ///
    /// `slug` is the path below `/docs` (`"guides/oauth"`, `"/guides/oauth/"`
    /// and `""` for the root).
    ///
    /// # Errors
    ///
    /// Returns `RenderError::PageNotFound` if the slug is not in the index,
    /// `RenderError::Storage` if the body cannot be read.
    pub fn render(&self, slug: &str) -> Result<PageRenderResult, RenderError> {
        let slug = PageSlug::parse(slug);
        let path = slug.path();
        let index = self.index();
        let doc = index
            .get(&path)
            .ok_or_else(|| RenderError::PageNotFound(slug.url()))?;

        let body = self.storage.read(&path)?;
        let mut page = assemble(&self.identity, self.clock.as_ref(), &slug, doc, &body);
        page.source_mtime = self.storage.mtime(&path).unwrap_or(0.0);

        tracing::debug!(page = %page.url, toc = page.toc.len(), "Rendered page");
        Ok(page)
    }

    /// Render a documentation page as a complete HTML document.
    ///
    /// # Errors
    ///
    /// Same as [`Site::render`], plus `RenderError::Json` if structured data
    /// cannot be serialized.
    pub fn render_html(&self, slug: &str) -> Result<String, RenderError> {
        let page = self.render(slug)?;
        self.page_html(&page)
    }

    /// Wrap a rendered page in the document shell with its JSON-LD scripts
    /// and the navigation sidebar.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Json` if structured data cannot be serialized.
    pub fn page_html(&self, page: &PageRenderResult) -> Result<String, RenderError> {
        let scripts = render_scripts(&page.structured_data)?;
        let title = self.identity.page_title(&page.title);
        let body = template::docs_body(page, self.index().documents());

        Ok(template::render_document(
            &self.identity,
            &Shell {
                title: &title,
                seo: &page.seo,
                scripts: &scripts,
                active: "/docs",
            },
            &body,
        ))
    }

    /// Plain-text export of a page for language models:
    /// `# {title}\nURL: {url}\n\n{body}`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::PageNotFound` if the slug is not in the index,
    /// `RenderError::Storage` if the body cannot be read.
    pub fn llm_text(&self, slug: &str) -> Result<String, RenderError> {
        let slug = PageSlug::parse(slug);
        let path = slug.path();
        let index = self.index();
        let doc = index
            .get(&path)
            .ok_or_else(|| RenderError::PageNotFound(slug.url()))?;

        let body = self.storage.read(&path)?;
        let processed = strip_mdx_statements(&body);

        Ok(format!(
            "# {}\nURL: {}\n\n{}",
            doc.title,
            doc.url(),
            processed.trim()
        ))
    }

    /// Every page's [`Site::llm_text`], separated by blank lines.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Storage` if any body cannot be read.
    pub fn llms_full(&self) -> Result<String, RenderError> {
        let index = self.index();
        let texts = index
            .documents()
            .iter()
            .map(|doc| self.llm_text(&doc.path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(texts.join("\n\n"))
    }

    /// Find pages whose title or description contains every query term
    /// (case-insensitive). Title matches are listed first; a blank query
    /// matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let index = self.index();
        let mut title_hits = Vec::new();
        let mut description_hits = Vec::new();

        for doc in index.documents() {
            let title = doc.title.to_lowercase();
            let haystack = format!(
                "{title} {}",
                doc.description.as_deref().unwrap_or_default().to_lowercase()
            );
            if !terms.iter().all(|t| haystack.contains(t.as_str())) {
                continue;
            }
            let hit = SearchHit {
                title: doc.title.clone(),
                description: doc.description.clone(),
                url: doc.url(),
            };
            if terms.iter().all(|t| title.contains(t.as_str())) {
                title_hits.push(hit);
            } else {
                description_hits.push(hit);
            }
        }

        tracing::debug!(query, hits = title_hits.len() + description_hits.len(), "Search");
        title_hits.extend(description_hits);
        title_hits
    }

    /// Head metadata for a non-documentation page.
    fn landing_seo(&self, title: &str, description: &str, url: &str) -> SeoMetadata {
        let mut seo = SeoMetadata::new(
            &self.identity,
            &SeoInput {
                title,
                description,
                url,
                ..Default::default()
            },
            self.clock.as_ref(),
        );
        seo.open_graph.kind = "website".to_owned();
        seo
    }

    fn landing_page(
        &self,
        title: &str,
        seo: &SeoMetadata,
        records: &[JsonLd],
        active: &str,
        body: &str,
    ) -> Result<String, RenderError> {
        let scripts = render_scripts(records)?;
        Ok(template::render_document(
            &self.identity,
            &Shell {
                title,
                seo,
                scripts: &scripts,
                active,
            },
            body,
        ))
    }

    /// Marketing home page with SoftwareApplication, Organization and
    /// WebSite records.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Json` if structured data cannot be serialized.
    pub fn home_html(&self) -> Result<String, RenderError> {
        let identity = &self.identity;
        let seo = self.landing_seo(&identity.default_title, &identity.description, "/");
        let records = [
            JsonLd::from(schema::software_application(identity)),
            JsonLd::from(schema::organization(identity)),
            JsonLd::from(schema::website(identity)),
        ];
        self.landing_page(
            &identity.default_title,
            &seo,
            &records,
            "/",
            &template::home_body(identity),
        )
    }

    /// Showcase page listing configured projects.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Json` if structured data cannot be serialized.
    pub fn showcase_html(&self) -> Result<String, RenderError> {
        let lead = format!(
            "Discover projects and applications built with {}.",
            self.identity.organization
        );
        let seo = self.landing_seo("Showcase", &lead, "/showcase");
        let records = [JsonLd::from(schema::breadcrumb_list(
            &self.identity,
            &listing_trail("Showcase", "/showcase"),
        ))];
        self.landing_page(
            &self.identity.page_title("Showcase"),
            &seo,
            &records,
            "/showcase",
            &template::showcase_body(&self.identity, &lead, &self.showcase),
        )
    }

    /// Sponsors page listing configured sponsors by tier.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Json` if structured data cannot be serialized.
    pub fn sponsors_html(&self) -> Result<String, RenderError> {
        let lead = format!(
            "Thank you to the companies and individuals who support {}.",
            self.identity.organization
        );
        let seo = self.landing_seo("Sponsors", &lead, "/sponsors");
        let records = [JsonLd::from(schema::breadcrumb_list(
            &self.identity,
            &listing_trail("Sponsors", "/sponsors"),
        ))];
        self.landing_page(
            &self.identity.page_title("Sponsors"),
            &seo,
            &records,
            "/sponsors",
            &template::sponsors_body(&self.identity, &lead, &self.sponsors),
        )
    }

    /// Sitemap XML covering the static pages and every documentation page.
    ///
    /// The documentation root is listed once, as a static page.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Sitemap` if the XML writer fails.
    pub fn sitemap_xml(&self) -> Result<String, RenderError> {
        let urls: Vec<String> = self
            .index()
            .urls()
            .into_iter()
            .filter(|url| url != "/docs")
            .collect();
        let entries = sitemap::entries(&self.identity, &urls, self.clock.as_ref());
        sitemap::render(&entries).map_err(RenderError::Sitemap)
    }

    /// `robots.txt` pointing at the sitemap.
    #[must_use]
    pub fn robots_txt(&self) -> String {
        sitemap::robots_txt(&self.identity)
    }
}

/// Two-entry trail for a top-level listing page.
fn listing_trail(name: &str, url: &str) -> Vec<kd_seo::Breadcrumb> {
    vec![
        kd_seo::Breadcrumb {
            name: "Home".to_owned(),
            url: "/".to_owned(),
        },
        kd_seo::Breadcrumb {
            name: name.to_owned(),
            url: url.to_owned(),
        },
    ]
}
