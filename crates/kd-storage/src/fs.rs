//! Filesystem storage.
//!
//! Maps a docs directory onto page paths:
//!
//! | File                      | Page path       |
//! |---------------------------|-----------------|
//! | `index.mdx`               | `""`            |
//! | `installation.mdx`        | `installation`  |
//! | `guides/index.md`         | `guides`        |
//! | `guides/oauth.md`         | `guides/oauth`  |
//!
//! When a page exists both as `{path}/index.*` and `{path}.*`, the directory
//! index wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::UNIX_EPOCH;

use regex::Regex;

use crate::frontmatter::{FrontMatter, split_front_matter};
use crate::storage::{Document, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Page file extensions, in lookup order.
const EXTENSIONS: [&str; 2] = ["mdx", "md"];

static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s+(.+)$").expect("H1 pattern is valid"));

/// Text of the first H1 heading outside fenced code blocks.
fn first_h1(body: &str) -> Option<String> {
    let mut fence: Option<(char, usize)> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~');
        let run = marker.map_or(0, |m| trimmed.chars().take_while(|c| *c == m).count());

        match (fence, marker) {
            (None, Some(m)) if run >= 3 => fence = Some((m, run)),
            (Some((open, len)), Some(m))
                if m == open && run >= len && trimmed[run..].trim().is_empty() =>
            {
                fence = None;
            }
            (None, _) => {
                if let Some(caps) = H1_REGEX.captures(line) {
                    return Some(caps[1].trim().to_owned());
                }
            }
            _ => {}
        }
    }

    None
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Blank strings count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_page_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e))
}

/// Storage reading pages from a directory tree.
#[derive(Debug)]
pub struct FsStorage {
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory of the pages.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Rejects paths containing `..` to prevent path traversal.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        if path.split('/').any(|s| s == "..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve a page path to its file.
    ///
    /// Tries `{path}/index.mdx`, `{path}/index.md`, then `{path}.mdx`,
    /// `{path}.md`.
    fn resolve_content(&self, url_path: &str) -> Option<PathBuf> {
        let dir = self.source_dir.join(url_path);
        let index = EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("index.{ext}")));
        let standalone = EXTENSIONS
            .iter()
            .filter(|_| !url_path.is_empty())
            .map(|ext| self.source_dir.join(format!("{url_path}.{ext}")));

        index.chain(standalone).find(|p| p.is_file())
    }

    /// Collect `(page path, file)` pairs below `dir`.
    fn collect_pages(dir: &Path, url_prefix: &str, pages: &mut Vec<(String, PathBuf)>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }
            let path = entry.path();
            let join = |segment: &str| {
                if url_prefix.is_empty() {
                    segment.to_owned()
                } else if segment.is_empty() {
                    url_prefix.to_owned()
                } else {
                    format!("{url_prefix}/{segment}")
                }
            };

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                Self::collect_pages(&path, &join(&name), pages);
            } else if is_page_file(&path) {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let url_path = if stem == "index" {
                    join("")
                } else {
                    join(&stem)
                };
                pages.push((url_path, path));
            }
        }
    }

    /// Build a `Document` from a page file.
    fn build_document(url_path: String, file: &Path) -> Result<Document, StorageError> {
        let content = fs::read_to_string(file)
            .map_err(|e| StorageError::io(e, Some(file.to_path_buf())).with_backend(BACKEND))?;
        let (yaml, body) = split_front_matter(&content);

        let fm = match yaml.map(FrontMatter::parse).transpose() {
            Ok(fm) => fm.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Invalid front matter, using defaults");
                FrontMatter::default()
            }
        };

        let title = non_blank(fm.title)
            .or_else(|| first_h1(body))
            .unwrap_or_else(|| {
                let name = url_path.rsplit('/').next().unwrap_or_default();
                if name.is_empty() {
                    "Documentation".to_owned()
                } else {
                    titlecase_from_slug(name)
                }
            });

        Ok(Document {
            path: url_path,
            title,
            description: non_blank(fm.description).map(|d| d.trim().to_owned()),
            section: non_blank(fm.section),
            published: non_blank(fm.published),
            modified: non_blank(fm.modified),
            full: fm.full,
            keywords: fm.keywords,
            no_index: fm.noindex,
        })
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        let mut pages = Vec::new();
        if self.source_dir.is_dir() {
            Self::collect_pages(&self.source_dir, "", &mut pages);
        }

        // Directory index before standalone file, .mdx before .md
        pages.sort_by(|(a_path, a_file), (b_path, b_file)| {
            let rank = |f: &PathBuf| {
                let is_index = f.file_stem().is_some_and(|s| s == "index");
                let is_mdx = f.extension().is_some_and(|e| e == "mdx");
                (!is_index, !is_mdx)
            };
            a_path.cmp(b_path).then(rank(a_file).cmp(&rank(b_file)))
        });

        let mut documents: Vec<Document> = Vec::with_capacity(pages.len());
        for (url_path, file) in pages {
            if documents.last().is_some_and(|d| d.path == url_path) {
                tracing::warn!(path = %file.display(), page = %url_path, "Duplicate page ignored");
                continue;
            }
            documents.push(Self::build_document(url_path, &file)?);
        }

        tracing::debug!(count = documents.len(), dir = %self.source_dir.display(), "Scanned pages");
        Ok(documents)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self
            .resolve_content(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        let content = fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))?;
        let (_, body) = split_front_matter(&content);
        Ok(body.to_owned())
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.resolve_content(path).is_some()
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        Self::validate_path(path)?;
        let full_path = self
            .resolve_content(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        let modified = fs::metadata(&full_path)
            .and_then(|m| m.modified())
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }
}
