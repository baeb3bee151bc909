//! YAML front matter of Markdown/MDX pages.
//!
//! A page may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: OAuth Providers
//! description: Configure GitHub and Google sign-in
//! section: Guides
//! date: 2025-01-15
//! ---
//!
//! Body...
//! ```

use serde::Deserialize;

/// Fields recognised in page front matter. Unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub section: Option<String>,
    #[serde(alias = "date", alias = "publishedAt")]
    pub published: Option<String>,
    #[serde(alias = "lastModified", alias = "updated")]
    pub modified: Option<String>,
    pub full: bool,
    pub keywords: Vec<String>,
    #[serde(alias = "noIndex")]
    pub noindex: bool,
}

impl FrontMatter {
    /// Parse front matter YAML. Blank input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a field has the wrong shape.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let trimmed = yaml.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(trimmed)
    }
}

/// Split a page into its front matter YAML and body.
///
/// Returns `(None, content)` when the page has no closed `---` block.
/// Leading blank lines of the body are dropped.
#[must_use]
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some((first, rest)) = content.split_once('\n') else {
        return (None, content);
    };
    if first.trim_end() != "---" {
        return (None, content);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, content)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_front_matter() {
        let (yaml, body) = split_front_matter("---\ntitle: Intro\n---\n\n# Body\n");

        assert_eq!(yaml, Some("title: Intro\n"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let content = "# Just Markdown\n\n---\n\nAfter a rule.";
        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_split_unclosed_front_matter() {
        let content = "---\ntitle: Intro\n\nNo closing fence";
        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_split_empty_front_matter() {
        assert_eq!(split_front_matter("---\n---\nBody"), (Some(""), "Body"));
    }

    #[test]
    fn test_split_crlf() {
        let (yaml, body) = split_front_matter("---\r\ntitle: Intro\r\n---\r\nBody");

        assert_eq!(yaml, Some("title: Intro\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_all_fields() {
        let yaml = r#"
title: "OAuth Providers"
description: |
  Configure GitHub
  and Google sign-in
section: Guides
date: 2025-01-15
lastModified: 2025-02-01T10:00:00Z
full: true
keywords: [oauth, github]
noindex: true
icon: Key
"#;
        let fm = FrontMatter::parse(yaml).unwrap();

        assert_eq!(
            fm,
            FrontMatter {
                title: Some("OAuth Providers".to_owned()),
                description: Some("Configure GitHub\nand Google sign-in\n".to_owned()),
                section: Some("Guides".to_owned()),
                published: Some("2025-01-15".to_owned()),
                modified: Some("2025-02-01T10:00:00Z".to_owned()),
                full: true,
                keywords: vec!["oauth".to_owned(), "github".to_owned()],
                noindex: true,
            }
        );
    }

    #[test]
    fn test_parse_blank_is_default() {
        assert_eq!(FrontMatter::parse("  \n").unwrap(), FrontMatter::default());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(FrontMatter::parse("title: [unclosed").is_err());
    }
}
