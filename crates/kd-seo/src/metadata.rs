//! Page-level SEO metadata.
//!
//! [`SeoMetadata`] gathers the values search engines and social networks
//! read from a page head: keywords, robots directives, canonical URL,
//! Open Graph and Twitter card properties. [`SeoMetadata::render_head_tags`]
//! writes them as HTML.

use std::fmt::Write;

use serde::Serialize;

use crate::clock::Clock;
use crate::html::escape_html;
use crate::identity::SiteIdentity;
use crate::schema::DEFAULT_SECTION;

/// Open Graph image width.
const OG_IMAGE_WIDTH: u32 = 1200;
/// Open Graph image height.
const OG_IMAGE_HEIGHT: u32 = 630;

/// Inputs of [`SeoMetadata::new`].
#[derive(Clone, Debug, Default)]
pub struct SeoInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Site-relative URL of the page.
    pub url: &'a str,
    pub section: Option<&'a str>,
    /// Social preview image; defaults to the site banner.
    pub image: Option<&'a str>,
    pub published_time: Option<&'a str>,
    pub modified_time: Option<&'a str>,
    /// Author names; defaults to the site author.
    pub authors: Vec<String>,
    /// Keywords appended to the site defaults.
    pub keywords: Vec<String>,
    pub no_index: bool,
}

/// SEO metadata of a single page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub authors: Vec<Author>,
    pub creator: String,
    pub publisher: String,
    pub robots: Robots,
    pub canonical: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    pub google_bot: GoogleBot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GoogleBot {
    pub index: bool,
    pub follow: bool,
    #[serde(rename = "max-video-preview")]
    pub max_video_preview: i32,
    #[serde(rename = "max-image-preview")]
    pub max_image_preview: String,
    #[serde(rename = "max-snippet")]
    pub max_snippet: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub images: Vec<OgImage>,
    pub locale: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub published_time: String,
    pub modified_time: String,
    pub section: String,
    pub authors: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub creator: String,
    pub site: String,
}

impl Robots {
    fn directive(index: bool, follow: bool) -> String {
        let index = if index { "index" } else { "noindex" };
        let follow = if follow { "follow" } else { "nofollow" };
        format!("{index}, {follow}")
    }

    /// `robots` meta content (e.g. `index, follow`).
    #[must_use]
    pub fn content(&self) -> String {
        Self::directive(self.index, self.follow)
    }

    /// `googlebot` meta content including preview limits.
    #[must_use]
    pub fn google_bot_content(&self) -> String {
        let bot = &self.google_bot;
        format!(
            "{}, max-video-preview:{}, max-image-preview:{}, max-snippet:{}",
            Self::directive(bot.index, bot.follow),
            bot.max_video_preview,
            bot.max_image_preview,
            bot.max_snippet
        )
    }
}

impl SeoMetadata {
    /// Build metadata for a page.
    ///
    /// Missing publish/modify times default to the clock's current instant,
    /// a missing section to `Documentation`.
    #[must_use]
    pub fn new(identity: &SiteIdentity, input: &SeoInput<'_>, clock: &dyn Clock) -> Self {
        let canonical = identity.absolute(input.url);
        let image = identity.resolve(input.image.unwrap_or(&identity.banner));
        let section = input
            .section
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SECTION)
            .to_owned();
        let authors = if input.authors.is_empty() {
            vec![identity.author.clone()]
        } else {
            input.authors.clone()
        };

        let mut keywords = identity.keywords.clone();
        keywords.extend(input.keywords.iter().cloned());

        let index = !input.no_index;
        let now = clock.now();
        let or_now = |value: Option<&str>| {
            value
                .filter(|v| !v.trim().is_empty())
                .map_or_else(|| now.clone(), str::to_owned)
        };

        Self {
            title: input.title.to_owned(),
            description: input.description.to_owned(),
            keywords,
            authors: authors
                .iter()
                .map(|name| Author {
                    name: name.clone(),
                    url: identity.base_url.clone(),
                })
                .collect(),
            creator: identity.author.clone(),
            publisher: identity.organization.clone(),
            robots: Robots {
                index,
                follow: index,
                google_bot: GoogleBot {
                    index,
                    follow: index,
                    max_video_preview: -1,
                    max_image_preview: "large".to_owned(),
                    max_snippet: -1,
                },
            },
            canonical: canonical.clone(),
            open_graph: OpenGraph {
                title: input.title.to_owned(),
                description: input.description.to_owned(),
                url: canonical,
                site_name: identity.site_name.clone(),
                images: vec![OgImage {
                    url: image.clone(),
                    width: OG_IMAGE_WIDTH,
                    height: OG_IMAGE_HEIGHT,
                    alt: input.title.to_owned(),
                }],
                locale: identity.locale.clone(),
                kind: "article".to_owned(),
                published_time: or_now(input.published_time),
                modified_time: or_now(input.modified_time),
                section: section.clone(),
                authors,
            },
            twitter: TwitterCard {
                card: "summary_large_image".to_owned(),
                title: input.title.to_owned(),
                description: input.description.to_owned(),
                images: vec![image],
                creator: identity.social_handle.clone(),
                site: identity.social_handle.clone(),
            },
            category: section,
        }
    }

    /// Write `<meta>` and `<link>` head tags (the `<title>` is left to the
    /// page template).
    pub fn render_head_tags(&self, html: &mut String) {
        meta_name(html, "description", &self.description);
        meta_name(html, "keywords", &self.keywords.join(", "));
        for author in &self.authors {
            meta_name(html, "author", &author.name);
        }
        meta_name(html, "creator", &self.creator);
        meta_name(html, "publisher", &self.publisher);
        meta_name(html, "robots", &self.robots.content());
        meta_name(html, "googlebot", &self.robots.google_bot_content());
        meta_name(html, "category", &self.category);
        let _ = writeln!(
            html,
            "<link rel=\"canonical\" href=\"{}\">",
            escape_html(&self.canonical)
        );

        let og = &self.open_graph;
        meta_property(html, "og:title", &og.title);
        meta_property(html, "og:description", &og.description);
        meta_property(html, "og:url", &og.url);
        meta_property(html, "og:site_name", &og.site_name);
        meta_property(html, "og:locale", &og.locale);
        meta_property(html, "og:type", &og.kind);
        for image in &og.images {
            meta_property(html, "og:image", &image.url);
            meta_property(html, "og:image:width", &image.width.to_string());
            meta_property(html, "og:image:height", &image.height.to_string());
            meta_property(html, "og:image:alt", &image.alt);
        }
        meta_property(html, "article:published_time", &og.published_time);
        meta_property(html, "article:modified_time", &og.modified_time);
        meta_property(html, "article:section", &og.section);
        for author in &og.authors {
            meta_property(html, "article:author", author);
        }

        let twitter = &self.twitter;
        meta_name(html, "twitter:card", &twitter.card);
        meta_name(html, "twitter:title", &twitter.title);
        meta_name(html, "twitter:description", &twitter.description);
        for image in &twitter.images {
            meta_name(html, "twitter:image", image);
        }
        meta_name(html, "twitter:creator", &twitter.creator);
        meta_name(html, "twitter:site", &twitter.site);
    }
}

fn meta_name(html: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        html,
        "<meta name=\"{name}\" content=\"{}\">",
        escape_html(content)
    );
}

fn meta_property(html: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        html,
        "<meta property=\"{property}\" content=\"{}\">",
        escape_html(content)
    );
}
