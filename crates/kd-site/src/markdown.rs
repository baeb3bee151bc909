//! Markdown/MDX body rendering.
//!
//! Bodies are rendered with pulldown-cmark's HTML writer. Headings are
//! intercepted to assign unique `id` attributes and collect the table of
//! contents.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use serde::Serialize;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Output of [`render_markdown`].
#[derive(Debug)]
pub(crate) struct RenderedMarkdown {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Parser options: GFM tables, strikethrough, task lists and footnotes.
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render a page body to HTML.
pub(crate) fn render_markdown(source: &str) -> RenderedMarkdown {
    let source = strip_mdx_statements(source);
    let mut headings = HeadingState::default();
    let mut events: Vec<Event<'_>> = Vec::new();

    for event in Parser::new_ext(&source, options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => headings.start(level),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = headings.complete() {
                    events.push(Event::Html(
                        format!("<h{} id=\"{}\">", heading.level, heading.id).into(),
                    ));
                    events.extend(heading.inner);
                    events.push(Event::Html(format!("</h{}>\n", heading.level).into()));
                }
            }
            event if headings.is_active() => headings.push(event),
            event => events.push(event),
        }
    }

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, events.into_iter());

    RenderedMarkdown {
        html: output,
        toc: headings.toc,
    }
}

/// Drop top-level MDX `import`/`export` statements.
///
/// A statement runs until its brackets balance, so multi-line imports and
/// `export const` objects are dropped whole. Lines inside fenced code blocks
/// are kept.
pub(crate) fn strip_mdx_statements(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut fence = FenceState::default();
    let mut statement_depth: Option<i32> = None;

    for line in source.split_inclusive('\n') {
        if let Some(depth) = statement_depth {
            if line.trim().is_empty() {
                statement_depth = None;
            } else {
                let depth = depth + bracket_balance(line);
                statement_depth = (depth > 0).then_some(depth);
                continue;
            }
        } else if !fence.update(line)
            && (line.starts_with("import ") || line.starts_with("export "))
        {
            let depth = bracket_balance(line);
            statement_depth = (depth > 0).then_some(depth);
            continue;
        }
        output.push_str(line);
    }

    output
}

/// Net count of opening minus closing brackets in a line.
fn bracket_balance(line: &str) -> i32 {
    line.chars().fold(0, |depth, c| match c {
        '{' | '(' | '[' => depth + 1,
        '}' | ')' | ']' => depth - 1,
        _ => depth,
    })
}

/// Tracks fenced code blocks. A fence closes only on a line of the same
/// marker character at least as long as the opening run.
#[derive(Default)]
struct FenceState {
    open: Option<(char, usize)>,
}

impl FenceState {
    /// Feed one line; returns `true` if it is a fence marker or lies inside
    /// a fenced block.
    fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~');
        let run = marker.map_or(0, |m| trimmed.chars().take_while(|c| *c == m).count());

        match (self.open, marker) {
            (None, Some(m)) if run >= 3 => {
                self.open = Some((m, run));
                true
            }
            (None, _) => false,
            (Some((open, len)), Some(m))
                if m == open && run >= len && trimmed[run..].trim().is_empty() =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
        }
    }
}

/// Heading being collected.
struct OpenHeading<'a> {
    level: u8,
    text: String,
    inner: Vec<Event<'a>>,
}

/// Completed heading ready to be written.
struct CompletedHeading<'a> {
    level: u8,
    id: String,
    inner: Vec<Event<'a>>,
}

/// Tracks headings, generates unique IDs and the table of contents.
#[derive(Default)]
struct HeadingState<'a> {
    current: Option<OpenHeading<'a>>,
    toc: Vec<TocEntry>,
    /// Last suffix handed out per base slug.
    id_counts: HashMap<String, usize>,
    used_ids: HashSet<String>,
}

impl<'a> HeadingState<'a> {
    fn is_active(&self) -> bool {
        self.current.is_some()
    }

    fn start(&mut self, level: HeadingLevel) {
        self.current = Some(OpenHeading {
            level: heading_level_to_num(level),
            text: String::new(),
            inner: Vec::new(),
        });
    }

    fn push(&mut self, event: Event<'a>) {
        let Some(heading) = self.current.as_mut() else {
            return;
        };
        if let Event::Text(text) | Event::Code(text) = &event {
            heading.text.push_str(text);
        }
        heading.inner.push(event);
    }

    /// Complete the open heading. H1 is not listed in the table of contents.
    fn complete(&mut self) -> Option<CompletedHeading<'a>> {
        let heading = self.current.take()?;
        let title = heading.text.trim().to_owned();
        let id = self.generate_id(&title);

        if heading.level >= 2 {
            self.toc.push(TocEntry {
                level: heading.level,
                title,
                id: id.clone(),
            });
        }

        Some(CompletedHeading {
            level: heading.level,
            id,
            inner: heading.inner,
        })
    }

    /// Generate a unique ID for a heading.
    ///
    /// Repeats get `-1`, `-2`, ... skipping any id already emitted, including
    /// ids of headings whose own text ends in a number.
    fn generate_id(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            base_id.push_str("section");
        }

        let mut suffix = self.id_counts.get(&base_id).copied().unwrap_or(0);
        let mut id = if suffix == 0 {
            base_id.clone()
        } else {
            format!("{base_id}-{suffix}")
        };
        while self.used_ids.contains(&id) {
            suffix += 1;
            id = format!("{base_id}-{suffix}");
        }

        self.id_counts.insert(base_id, suffix);
        self.used_ids.insert(id.clone());
        id
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_basic_paragraph() {
        let result = render_markdown("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>\n");
        assert!(result.toc.is_empty());
    }

    #[test]
    fn test_heading_with_id() {
        let result = render_markdown("## Section Title");
        assert_eq!(result.html, "<h2 id=\"section-title\">Section Title</h2>\n");
        assert_eq!(
            result.toc,
            vec![TocEntry {
                level: 2,
                title: "Section Title".to_owned(),
                id: "section-title".to_owned(),
            }]
        );
    }

    #[test]
    fn test_heading_inline_formatting() {
        let result = render_markdown("### The `signIn` **callback**");
        assert_eq!(
            result.html,
            "<h3 id=\"the-signin-callback\">The <code>signIn</code> <strong>callback</strong></h3>\n"
        );
        assert_eq!(result.toc[0].title, "The signIn callback");
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render_markdown("## FAQ\n\nContent\n\n## FAQ\n\nMore content\n\n## FAQ");
        let ids: Vec<&str> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_heading_ids_skip_taken_suffixes() {
        let result = render_markdown("## FAQ\n\n## FAQ\n\n## FAQ 1\n\n## FAQ");
        let ids: Vec<&str> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["faq", "faq-1", "faq-1-1", "faq-2"]);
    }

    #[test]
    fn test_heading_ids_numbered_heading_first() {
        let result = render_markdown("## FAQ 1\n\n## FAQ\n\n## FAQ");
        let ids: Vec<&str> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["faq-1", "faq", "faq-2"]);
    }

    #[test]
    fn test_h1_not_in_toc() {
        let result = render_markdown("# Title\n\n## Install\n\n### From npm");
        assert!(result.html.starts_with("<h1 id=\"title\">Title</h1>"));
        let levels: Vec<u8> = result.toc.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![2, 3]);
    }

    #[test]
    fn test_symbol_only_heading_gets_fallback_id() {
        let result = render_markdown("## ???");
        assert_eq!(result.toc[0].id, "section");
    }

    #[test]
    fn test_gfm_extensions() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n";
        let result = render_markdown(markdown);
        assert!(result.html.contains("<table>"));
        assert!(result.html.contains("<del>old</del>"));
        assert!(result.html.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_strip_mdx_statements() {
        let source = "import { Callout } from 'fumadocs-ui/components/callout';\n\n# Title\n\n```ts\nimport { auth } from './auth';\n```\n";
        assert_eq!(
            strip_mdx_statements(source),
            "\n# Title\n\n```ts\nimport { auth } from './auth';\n```\n"
        );
    }

    #[test]
    fn test_strip_multiline_import() {
        let source = "import {\n  Tab,\n  Tabs,\n} from 'fumadocs-ui/components/tabs';\n\n# Title\n";
        assert_eq!(strip_mdx_statements(source), "\n# Title\n");
    }

    #[test]
    fn test_strip_multiline_export() {
        let source = "export const meta = {\n  title: 'Setup',\n  tags: ['a', 'b'],\n};\nBody text.\n";
        assert_eq!(strip_mdx_statements(source), "Body text.\n");
    }

    #[test]
    fn test_strip_unterminated_statement_stops_at_blank_line() {
        let source = "import {\n  Tab,\n\nStill here.\n";
        assert_eq!(strip_mdx_statements(source), "\nStill here.\n");
    }

    #[test]
    fn test_fence_closes_on_matching_marker_only() {
        let source = "```md\n~~~\nimport { a } from 'a';\n```\nimport { b } from 'b';\nText\n";
        assert_eq!(
            strip_mdx_statements(source),
            "```md\n~~~\nimport { a } from 'a';\n```\nText\n"
        );
    }

    #[test]
    fn test_code_block_import_is_rendered() {
        let result = render_markdown("```ts\nimport { auth } from './auth';\n```\n");
        assert!(result.html.contains("<code class=\"language-ts\">import { auth } from"));
    }
}
