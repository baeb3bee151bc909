//! Static export of the whole site.
//!
//! # Output Layout
//!
//! ```text
//! out/
//! ├── index.html
//! ├── docs/
//! │   ├── index.html
//! │   └── guides/oauth/index.html
//! ├── docs.mdx
//! ├── docs/guides/oauth.mdx
//! ├── showcase/index.html
//! ├── sponsors/index.html
//! ├── sitemap.xml
//! ├── robots.txt
//! └── llms-full.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::page::RenderError;
use crate::site::Site;

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Counts reported after a successful build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Documentation pages written.
    pub pages: usize,
    /// Files written in total.
    pub files: usize,
}

/// Writes every page of a [`Site`] to a directory.
pub struct StaticSiteBuilder<'a> {
    site: &'a Site,
}

impl<'a> StaticSiteBuilder<'a> {
    #[must_use]
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Rescan the content and write the site under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Render` if the scan or a page render fails,
    /// `BuildError::Io` if a file cannot be written.
    pub fn build(&self, output_dir: &Path) -> Result<BuildSummary, BuildError> {
        let index = self.site.reload()?;
        let mut writer = Writer {
            root: output_dir,
            files: 0,
        };

        writer.write("index.html", &self.site.home_html()?)?;
        writer.write("showcase/index.html", &self.site.showcase_html()?)?;
        writer.write("sponsors/index.html", &self.site.sponsors_html()?)?;

        for doc in index.documents() {
            let page = self.site.render(&doc.path)?;
            let html = self.site.page_html(&page)?;
            let markdown = self.site.llm_text(&doc.path)?;

            if doc.path.is_empty() {
                writer.write("docs/index.html", &html)?;
                writer.write("docs.mdx", &markdown)?;
            } else {
                writer.write(&format!("docs/{}/index.html", doc.path), &html)?;
                writer.write(&format!("docs/{}.mdx", doc.path), &markdown)?;
            }
            tracing::debug!(page = %page.url, "Exported page");
        }

        writer.write("sitemap.xml", &self.site.sitemap_xml()?)?;
        writer.write("robots.txt", &self.site.robots_txt())?;
        writer.write("llms-full.txt", &self.site.llms_full()?)?;

        let summary = BuildSummary {
            pages: index.len(),
            files: writer.files,
        };
        tracing::info!(
            pages = summary.pages,
            files = summary.files,
            output = %output_dir.display(),
            "Static export complete"
        );
        Ok(summary)
    }
}

struct Writer<'a> {
    root: &'a Path,
    files: usize,
}

impl Writer<'_> {
    fn write(&mut self, relative: &str, contents: &str) -> Result<(), BuildError> {
        let path = self.root.join(relative);
        let io_err = |source| BuildError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&path, contents).map_err(io_err)?;
        self.files += 1;
        Ok(())
    }
}
