//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Document, Storage, StorageError};

/// Mock storage for testing.
///
/// Stores documents and bodies in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use kd_storage::{Document, MockStorage, Storage};
///
/// let storage = MockStorage::new().with_page("guides/oauth", "OAuth", "# OAuth\n\nContent.");
///
/// let docs = storage.scan().unwrap();
/// let body = storage.read("guides/oauth").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: RwLock<Vec<Document>>,
    contents: RwLock<HashMap<String, String>>,
    mtimes: RwLock<HashMap<String, f64>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given path, title and body.
    #[must_use]
    pub fn with_page(self, path: &str, title: &str, body: &str) -> Self {
        self.add_document(
            Document {
                path: path.to_owned(),
                title: title.to_owned(),
                ..Default::default()
            },
            body,
        );
        self
    }

    /// Add a page with full metadata.
    #[must_use]
    pub fn with_document(self, document: Document, body: &str) -> Self {
        self.add_document(document, body);
        self
    }

    /// Set modification time for a path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, path: &str, mtime: f64) -> Self {
        self.mtimes.write().unwrap().insert(path.to_owned(), mtime);
        self
    }

    /// Add or replace a page after construction.
    ///
    /// Documents stay ordered by path, as [`Storage::scan`] requires.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn add_document(&self, document: Document, body: &str) {
        self.contents
            .write()
            .unwrap()
            .insert(document.path.clone(), body.to_owned());
        let mut documents = self.documents.write().unwrap();
        documents.retain(|d| d.path != document.path);
        documents.push(document);
        documents.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Remove a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove(&self, path: &str) {
        self.contents.write().unwrap().remove(path);
        self.documents.write().unwrap().retain(|d| d.path != path);
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        Ok(self.documents.read().unwrap().clone())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }

    fn exists(&self, path: &str) -> bool {
        self.contents.read().unwrap().contains_key(path)
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        self.mtimes
            .read()
            .unwrap()
            .get(path)
            .copied()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }
}
