//! HTML page templates.
//!
//! Pages are built by appending to a `String`: a shared document shell
//! (head tags, JSON-LD scripts, header) around page-specific bodies.

use std::fmt::Write;

use kd_config::{ShowcaseItem, SponsorItem};
use kd_seo::{Breadcrumb, SeoMetadata, SiteIdentity, escape_html};
use kd_storage::Document;

use crate::markdown::TocEntry;
use crate::page::PageRenderResult;

/// Links in the site header.
const HEADER_LINKS: [(&str, &str); 3] = [
    ("Documentation", "/docs"),
    ("Showcase", "/showcase"),
    ("Sponsors", "/sponsors"),
];

/// Quick setup steps on the home page: title, description, command.
const QUICK_SETUP: [(&str, &str, &str); 3] = [
    (
        "Install the CLI",
        "Add the dev-only CLI and run the interactive init to detect your framework, \
         install deps, and scaffold config.",
        "pnpm add -g @keyloom/cli",
    ),
    (
        "Install Hooks",
        "Lets you access auth state and user info on the client.",
        "pnpm add @keyloom/react",
    ),
    (
        "Install UI",
        "Don't want the hassle of building your own auth UI? Use our UI library.",
        "pnpm add @keyloom/ui",
    ),
];

/// Document-level data shared by every page.
pub(crate) struct Shell<'a> {
    /// Full `<title>` text.
    pub title: &'a str,
    pub seo: &'a SeoMetadata,
    /// Pre-rendered JSON-LD `<script>` elements.
    pub scripts: &'a str,
    /// Header link to mark as current.
    pub active: &'a str,
}

/// Render a complete HTML document around `body`.
pub(crate) fn render_document(identity: &SiteIdentity, shell: &Shell<'_>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 8192);

    let lang = identity.language.split('-').next().unwrap_or("en");
    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"{}\">", escape_html(lang));
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(shell.title));
    shell.seo.render_head_tags(&mut html);
    let _ = writeln!(
        html,
        "<link rel=\"icon\" href=\"{}\">",
        escape_html(&identity.logo)
    );
    html.push_str(shell.scripts);
    html.push_str("</head>\n<body class=\"flex flex-col min-h-screen\">\n");

    render_header(&mut html, identity, shell.active);
    html.push_str(body);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, identity: &SiteIdentity, active: &str) {
    html.push_str("<header class=\"site-header\">\n<nav>\n");
    let _ = writeln!(
        html,
        "<a href=\"/\" class=\"logo\"><img src=\"{}\" alt=\"\" width=\"24\" height=\"24\"> {}</a>",
        escape_html(&identity.logo),
        escape_html(&identity.organization)
    );
    for (label, url) in HEADER_LINKS {
        let current = if url == active {
            " aria-current=\"page\""
        } else {
            ""
        };
        let _ = writeln!(html, "<a href=\"{url}\"{current}>{label}</a>");
    }
    if !identity.repository_url.is_empty() {
        let _ = writeln!(
            html,
            "<a href=\"{}\" rel=\"noopener noreferrer\">GitHub</a>",
            escape_html(&identity.repository_url)
        );
    }
    html.push_str("</nav>\n</header>\n");
}

/// Body of a documentation page: sidebar, breadcrumbs, article and ToC.
pub(crate) fn docs_body(page: &PageRenderResult, navigation: &[Document]) -> String {
    let mut html = String::with_capacity(page.html.len() + 4096);
    html.push_str("<div class=\"docs-layout\">\n");

    render_sidebar(&mut html, navigation, &page.url);

    html.push_str("<main class=\"docs-page\">\n");
    render_breadcrumbs(&mut html, &page.breadcrumbs);

    html.push_str("<article class=\"prose\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&page.title));
    let _ = writeln!(
        html,
        "<p class=\"description\">{}</p>",
        escape_html(&page.description)
    );
    let _ = writeln!(
        html,
        "<div class=\"page-actions\"><a href=\"{}.mdx\">View as Markdown</a></div>",
        escape_html(&page.url)
    );
    html.push_str(&page.html);
    html.push_str("</article>\n</main>\n");

    if !page.full {
        render_toc(&mut html, &page.toc);
    }

    html.push_str("</div>\n");
    html
}

/// Render the navigation sidebar as a flat list indented by depth.
fn render_sidebar(html: &mut String, navigation: &[Document], current_url: &str) {
    html.push_str("<aside class=\"sidebar\">\n<nav>\n<ul>\n");
    for doc in navigation {
        let url = doc.url();
        let depth = doc.path.split('/').filter(|s| !s.is_empty()).count();
        let current = if url == current_url {
            " aria-current=\"page\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<li class=\"depth-{depth}\"><a href=\"{}\"{current}>{}</a></li>",
            escape_html(&url),
            escape_html(&doc.title),
        );
    }
    html.push_str("</ul>\n</nav>\n</aside>\n");
}

fn render_breadcrumbs(html: &mut String, breadcrumbs: &[Breadcrumb]) {
    html.push_str("<nav aria-label=\"Breadcrumb\" class=\"breadcrumbs\">\n<ol>\n");
    for crumb in breadcrumbs {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&crumb.url),
            escape_html(&crumb.name),
        );
    }
    html.push_str("</ol>\n</nav>\n");
}

fn render_toc(html: &mut String, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    html.push_str("<aside class=\"toc\">\n<p>On this page</p>\n<ul>\n");
    for entry in toc {
        let _ = writeln!(
            html,
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title),
        );
    }
    html.push_str("</ul>\n</aside>\n");
}

/// Body of the marketing home page.
pub(crate) fn home_body(identity: &SiteIdentity) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<main class=\"home\">\n<section class=\"hero\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&identity.default_title));
    let _ = writeln!(html, "<p>{}</p>", escape_html(&identity.description));
    html.push_str("<a href=\"/docs\" class=\"button\">Get Started</a>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"quick-setup\">\n<h2>Quick Setup</h2>\n<ol>\n");
    for (title, description, command) in QUICK_SETUP {
        let _ = writeln!(
            html,
            "<li><h3>{}</h3><p>{}</p><pre><code>{}</code></pre></li>",
            escape_html(title),
            escape_html(description),
            escape_html(command),
        );
    }
    html.push_str("</ol>\n</section>\n");

    if !identity.software.features.is_empty() {
        html.push_str("<section class=\"features\">\n<h2>Features</h2>\n<ul>\n");
        for feature in &identity.software.features {
            let _ = writeln!(html, "<li>{}</li>", escape_html(feature));
        }
        html.push_str("</ul>\n</section>\n");
    }

    html.push_str("</main>\n");
    html
}

/// Hero section shared by the listing pages.
fn render_listing_hero(html: &mut String, title: &str, lead: &str) {
    html.push_str("<section class=\"hero\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(title));
    let _ = writeln!(html, "<p>{}</p>", escape_html(lead));
    html.push_str("</section>\n");
}

/// Invitation shown when a listing has no entries.
fn render_empty_state(html: &mut String, identity: &SiteIdentity, heading: &str, message: &str) {
    html.push_str("<section class=\"empty-state\">\n");
    let _ = writeln!(html, "<h3>{}</h3>", escape_html(heading));
    let _ = writeln!(html, "<p>{}</p>", escape_html(message));
    if !identity.repository_url.is_empty() {
        let _ = writeln!(
            html,
            "<a href=\"{}\" class=\"button\">Contribute on GitHub</a>",
            escape_html(&identity.repository_url)
        );
    }
    html.push_str("</section>\n");
}

/// Body of the showcase page.
pub(crate) fn showcase_body(identity: &SiteIdentity, lead: &str, items: &[ShowcaseItem]) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<main class=\"showcase\">\n");
    render_listing_hero(&mut html, "Showcase", lead);

    if items.is_empty() {
        render_empty_state(
            &mut html,
            identity,
            "No showcase items yet",
            &format!(
                "We're looking for projects built with {} to feature here. \
                 Add yours to the showcase list in kd.toml.",
                identity.organization
            ),
        );
    } else {
        html.push_str("<ul class=\"cards\">\n");
        for item in items {
            html.push_str("<li class=\"card\">\n");
            if let Some(image) = &item.image {
                let _ = writeln!(
                    html,
                    "<img src=\"{}\" alt=\"{} logo\">",
                    escape_html(image),
                    escape_html(&item.name)
                );
            }
            let _ = writeln!(
                html,
                "<h3><a href=\"{}\" rel=\"noopener noreferrer\">{}</a></h3>",
                escape_html(&item.url),
                escape_html(&item.name)
            );
            let _ = writeln!(html, "<p>{}</p>", escape_html(&item.description));
            if !item.tags.is_empty() {
                html.push_str("<ul class=\"tags\">");
                for tag in &item.tags {
                    let _ = write!(html, "<li>{}</li>", escape_html(tag));
                }
                html.push_str("</ul>\n");
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</main>\n");
    html
}

/// Body of the sponsors page. `sponsors` must already be ordered by tier.
pub(crate) fn sponsors_body(identity: &SiteIdentity, lead: &str, sponsors: &[SponsorItem]) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<main class=\"sponsors\">\n");
    render_listing_hero(&mut html, "Sponsors", lead);

    if sponsors.is_empty() {
        render_empty_state(
            &mut html,
            identity,
            "Become our first sponsor",
            &format!(
                "Sponsorship keeps {} maintained and free for everyone.",
                identity.organization
            ),
        );
    } else {
        html.push_str("<ul class=\"cards\">\n");
        for sponsor in sponsors {
            match sponsor.tier {
                Some(tier) => {
                    let _ = writeln!(html, "<li class=\"card tier-{}\">", tier.as_str());
                }
                None => html.push_str("<li class=\"card\">\n"),
            }
            if let Some(logo) = &sponsor.logo {
                let _ = writeln!(
                    html,
                    "<img src=\"{}\" alt=\"{} logo\">",
                    escape_html(logo),
                    escape_html(&sponsor.name)
                );
            }
            let _ = writeln!(
                html,
                "<h3><a href=\"{}\" rel=\"noopener noreferrer sponsored\">{}</a></h3>",
                escape_html(&sponsor.url),
                escape_html(&sponsor.name)
            );
            let _ = writeln!(html, "<p>{}</p>", escape_html(&sponsor.description));
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</main>\n");
    html
}
