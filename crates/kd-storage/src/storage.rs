//! Storage trait and error types.
//!
//! # URL Path Convention
//!
//! All path parameters in Storage methods are page paths below `/docs`,
//! not file paths:
//! - `""` - documentation root (`index.mdx`)
//! - `"installation"` - standalone page
//! - `"guides"` - directory with index
//! - `"guides/oauth"` - nested page

use std::path::PathBuf;

/// Page metadata returned by storage scan.
///
/// Optional strings are `None` when the front matter omits them or leaves
/// them blank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// URL path below `/docs` (e.g., "", "installation", "guides/oauth").
    pub path: String,
    /// Page title (resolved: front matter > H1 > file name).
    pub title: String,
    /// Page description.
    pub description: Option<String>,
    /// Explicit article section.
    pub section: Option<String>,
    /// Publication date, passed through as written.
    pub published: Option<String>,
    /// Last modification date, passed through as written.
    pub modified: Option<String>,
    /// Render without the table of contents column.
    pub full: bool,
    /// Keywords added to the site defaults.
    pub keywords: Vec<String>,
    /// Ask crawlers not to index the page.
    pub no_index: bool,
}

impl Document {
    /// Site-relative URL of the page (`/docs` or `/docs/{path}`).
    #[must_use]
    pub fn url(&self) -> String {
        if self.path.is_empty() {
            "/docs".to_owned()
        } else {
            format!("/docs/{}", self.path)
        }
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Content could not be parsed.
    Parse,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Parse => "Parse error",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for documentation pages.
///
/// All path parameters are URL paths below `/docs`, not file paths.
pub trait Storage: Send + Sync {
    /// Scan and return all documents, ordered by path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails.
    fn scan(&self) -> Result<Vec<Document>, StorageError>;

    /// Read the Markdown body of a page, without front matter.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the page doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Check if a page exists at the given URL path.
    ///
    /// Returns `false` on errors.
    fn exists(&self, path: &str) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the page doesn't exist or mtime can't be retrieved.
    fn mtime(&self, path: &str) -> Result<f64, StorageError>;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_document_url_root() {
        let doc = Document {
            title: "Introduction".to_owned(),
            ..Default::default()
        };

        assert_eq!(doc.url(), "/docs");
    }

    #[test]
    fn test_document_url_nested() {
        let doc = Document {
            path: "guides/oauth".to_owned(),
            title: "OAuth".to_owned(),
            ..Default::default()
        };

        assert_eq!(doc.url(), "/docs/guides/oauth");
    }

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_with_path() {
        let err = StorageError::new(StorageErrorKind::NotFound).with_path("/foo/bar");

        assert_eq!(err.path.as_deref(), Some(Path::new("/foo/bar")));
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::not_found("guides/oauth").with_backend("Fs");

        assert_eq!(err.to_string(), "[Fs] Not found (path: guides/oauth)");
    }

    #[test]
    fn test_storage_error_io_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::io(io_err, Some(PathBuf::from("/docs/a.md")));

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "Permission denied: denied (path: /docs/a.md)");
        assert!(std::error::Error::source(&err).is_some());
    }
}
