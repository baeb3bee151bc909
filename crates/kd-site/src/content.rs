//! In-memory index of documentation pages.

use std::collections::HashMap;

use kd_storage::Document;

/// Snapshot of all documentation pages, ordered by path.
///
/// Built from a storage scan and swapped atomically by [`Site`](crate::Site)
/// on reload; readers keep their snapshot for as long as they need it.
#[derive(Debug, Default)]
pub struct ContentIndex {
    documents: Vec<Document>,
    by_path: HashMap<String, usize>,
}

impl ContentIndex {
    /// Build an index sorted by path. Later duplicates of a path are ignored.
    #[must_use]
    pub fn new(mut documents: Vec<Document>) -> Self {
        // Stable, so the first duplicate still wins.
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        let mut by_path = HashMap::with_capacity(documents.len());
        let mut unique = Vec::with_capacity(documents.len());
        for doc in documents {
            if by_path.contains_key(&doc.path) {
                continue;
            }
            by_path.insert(doc.path.clone(), unique.len());
            unique.push(doc);
        }
        Self {
            documents: unique,
            by_path,
        }
    }

    /// Look up a page by path (`""` for the documentation root).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.by_path.get(path).map(|&i| &self.documents[i])
    }

    /// All pages in path order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Site-relative URLs of all pages.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.documents.iter().map(Document::url).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(path: &str, title: &str) -> Document {
        Document {
            path: path.to_owned(),
            title: title.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_get() {
        let index = ContentIndex::new(vec![doc("", "Introduction"), doc("guides/oauth", "OAuth")]);

        assert_eq!(index.get("").map(|d| d.title.as_str()), Some("Introduction"));
        assert_eq!(index.get("guides/oauth").map(|d| d.title.as_str()), Some("OAuth"));
        assert!(index.get("guides").is_none());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_urls() {
        let index = ContentIndex::new(vec![doc("", "Introduction"), doc("installation", "Install")]);

        assert_eq!(index.urls(), vec!["/docs", "/docs/installation"]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let index = ContentIndex::new(vec![doc("guide", "First"), doc("guide", "Second")]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("guide").map(|d| d.title.as_str()), Some("First"));
    }

    #[test]
    fn test_unsorted_input_is_ordered_by_path() {
        let index = ContentIndex::new(vec![
            doc("installation", "Install"),
            doc("guide", "First"),
            doc("", "Introduction"),
            doc("guide", "Second"),
            doc("api/hooks", "Hooks"),
        ]);

        assert_eq!(
            index.urls(),
            vec!["/docs", "/docs/api/hooks", "/docs/guide", "/docs/installation"]
        );
        assert_eq!(index.get("guide").map(|d| d.title.as_str()), Some("First"));
        assert_eq!(
            index.get("installation").map(|d| d.title.as_str()),
            Some("Install")
        );
    }

    #[test]
    fn test_empty() {
        let index = ContentIndex::default();
        assert!(index.is_empty());
        assert!(index.urls().is_empty());
    }
}
