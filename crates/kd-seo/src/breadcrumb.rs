//! Breadcrumb trails for documentation pages.
//!
//! A trail always starts with `Home` (`/`) and `Documentation` (`/docs`),
//! followed by one entry per slug segment. Segments are not checked against
//! the content tree: any slug produces a well-formed trail.

use serde::Serialize;

/// Root entry of every trail.
const HOME: (&str, &str) = ("Home", "/");
/// Documentation root entry of every trail.
const DOCS: (&str, &str) = ("Documentation", "/docs");

/// Breadcrumb entry: display name and site-relative URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display name.
    pub name: String,
    /// Site-relative URL (e.g. `/docs/guides/setup`).
    pub url: String,
}

impl Breadcrumb {
    fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Position of a documentation page in the content hierarchy.
///
/// The root documentation page has an empty slug.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PageSlug {
    segments: Vec<String>,
}

impl PageSlug {
    /// Create a slug from segments.
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Parse a slash-separated path (`"guides/setup"`, `"/guides/setup/"`).
    ///
    /// Empty segments are dropped.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Slug segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the documentation root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Slash-joined path without leading slash (`""` for the root).
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Site-relative URL of the page (`/docs` or `/docs/a/b`).
    #[must_use]
    pub fn url(&self) -> String {
        let mut url = DOCS.1.to_owned();
        for segment in &self.segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Breadcrumb trail for this slug.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(&self.segments)
    }
}

impl FromIterator<String> for PageSlug {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::fmt::Display for PageSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url())
    }
}

/// Build the breadcrumb trail for slug segments.
///
/// Returns `Home`, `Documentation`, then one entry per segment whose URL is
/// the cumulative path and whose name is [`humanize_segment`] of the segment.
#[must_use]
pub fn breadcrumbs<S: AsRef<str>>(segments: &[S]) -> Vec<Breadcrumb> {
    let mut trail = Vec::with_capacity(segments.len() + 2);
    trail.push(Breadcrumb::new(HOME.0, HOME.1));
    trail.push(Breadcrumb::new(DOCS.0, DOCS.1));

    let mut current = DOCS.1.to_owned();
    for segment in segments {
        let segment = segment.as_ref();
        current.push('/');
        current.push_str(segment);
        trail.push(Breadcrumb::new(humanize_segment(segment), current.clone()));
    }

    trail
}

/// Turn a slug segment into a display name.
///
/// Splits on hyphens and upper-cases the first character of every word:
/// `"getting-started"` becomes `"Getting Started"`. Acronyms are not
/// special-cased (`"api"` becomes `"Api"`).
#[must_use]
pub fn humanize_segment(segment: &str) -> String {
    segment
        .split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pairs(trail: &[Breadcrumb]) -> Vec<(&str, &str)> {
        trail
            .iter()
            .map(|b| (b.name.as_str(), b.url.as_str()))
            .collect()
    }

    #[test]
    fn test_breadcrumbs_empty_slug() {
        let trail = breadcrumbs::<&str>(&[]);

        assert_eq!(
            pairs(&trail),
            vec![("Home", "/"), ("Documentation", "/docs")]
        );
    }

    #[test]
    fn test_breadcrumbs_nested_slug() {
        let trail = breadcrumbs(&["getting-started", "installation"]);

        assert_eq!(
            pairs(&trail),
            vec![
                ("Home", "/"),
                ("Documentation", "/docs"),
                ("Getting Started", "/docs/getting-started"),
                ("Installation", "/docs/getting-started/installation"),
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_length_and_fixed_prefix() {
        for segments in [vec!["a"], vec!["a", "b"], vec!["x", "y", "z", "w"]] {
            let trail = breadcrumbs(&segments);

            assert_eq!(trail.len(), segments.len() + 2);
            assert_eq!(trail[0], Breadcrumb::new("Home", "/"));
            assert_eq!(trail[1], Breadcrumb::new("Documentation", "/docs"));
        }
    }

    #[test]
    fn test_breadcrumb_urls_extend_previous() {
        let trail = breadcrumbs(&["guides", "oauth-providers", "github"]);

        for pair in trail.windows(2) {
            let (prev, next) = (&pair[0].url, &pair[1].url);
            assert!(next.starts_with(prev.as_str()), "{next} should extend {prev}");
            assert!(next.len() > prev.len());
        }
    }

    #[test]
    fn test_breadcrumbs_accepts_unknown_segments() {
        let trail = breadcrumbs(&["does-not-exist"]);

        assert_eq!(trail[2].name, "Does Not Exist");
        assert_eq!(trail[2].url, "/docs/does-not-exist");
    }

    #[test]
    fn test_humanize_segment() {
        assert_eq!(humanize_segment("getting-started"), "Getting Started");
        assert_eq!(humanize_segment("api"), "Api");
        assert_eq!(humanize_segment("rbac"), "Rbac");
        assert_eq!(humanize_segment("nextJs-setup"), "NextJs Setup");
        assert_eq!(humanize_segment(""), "");
    }

    #[test]
    fn test_humanize_segment_keeps_empty_words() {
        assert_eq!(humanize_segment("a--b"), "A  B");
    }

    #[test]
    fn test_capitalize_first_unicode() {
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(capitalize_first("ß"), "SS");
    }

    #[test]
    fn test_page_slug_parse() {
        let slug = PageSlug::parse("/guides//setup/");

        assert_eq!(slug.segments(), ["guides", "setup"]);
        assert_eq!(slug.path(), "guides/setup");
        assert_eq!(slug.url(), "/docs/guides/setup");
        assert_eq!(slug.first(), Some("guides"));
    }

    #[test]
    fn test_page_slug_root() {
        let slug = PageSlug::parse("");

        assert!(slug.is_empty());
        assert_eq!(slug.url(), "/docs");
        assert_eq!(slug.breadcrumbs().len(), 2);
    }
}
