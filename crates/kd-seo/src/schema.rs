//! schema.org structured-data records and their assemblers.
//!
//! Each record is a fixed-shape value that serialises with an `"@type"`
//! discriminator. [`JsonLd`] adds the `"@context"` needed when a record is
//! embedded in a page.
//!
//! The assemblers are pure: the same identity, inputs and clock reading
//! always produce equal records. Optional inputs are not validated; a
//! non-ISO date string is passed through as written.

use serde::Serialize;

use crate::breadcrumb::Breadcrumb;
use crate::clock::Clock;
use crate::identity::SiteIdentity;

/// JSON-LD context of every embedded record.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Section label used when a page declares none.
pub const DEFAULT_SECTION: &str = "Documentation";

/// Top-level structured-data record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredData {
    Organization(Organization),
    WebSite(WebSite),
    Article(Article),
    BreadcrumbList(BreadcrumbList),
    SoftwareApplication(SoftwareApplication),
}

impl StructuredData {
    /// schema.org type name of the record.
    #[must_use]
    pub fn schema_type(&self) -> &'static str {
        match self {
            Self::Organization(_) => "Organization",
            Self::WebSite(_) => "WebSite",
            Self::Article(_) => "Article",
            Self::BreadcrumbList(_) => "BreadcrumbList",
            Self::SoftwareApplication(_) => "SoftwareApplication",
        }
    }
}

/// Record ready for embedding: `{"@context": "https://schema.org", ...}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JsonLd {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(flatten)]
    data: StructuredData,
}

impl JsonLd {
    /// Wrap a record with the schema.org context.
    #[must_use]
    pub fn new(data: StructuredData) -> Self {
        Self {
            context: SCHEMA_CONTEXT,
            data,
        }
    }

    /// The wrapped record.
    #[must_use]
    pub fn data(&self) -> &StructuredData {
        &self.data
    }
}

macro_rules! impl_into_json_ld {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for StructuredData {
                fn from(record: $variant) -> Self {
                    Self::$variant(record)
                }
            }

            impl From<$variant> for JsonLd {
                fn from(record: $variant) -> Self {
                    Self::new(StructuredData::$variant(record))
                }
            }
        )+
    };
}

impl_into_json_ld!(
    Organization,
    WebSite,
    Article,
    BreadcrumbList,
    SoftwareApplication,
);

impl From<StructuredData> for JsonLd {
    fn from(data: StructuredData) -> Self {
        Self::new(data)
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    pub description: String,
    pub url: String,
    pub logo: String,
    pub image: String,
    pub same_as: Vec<String>,
    pub contact_point: ContactPoint,
    pub founding_date: String,
    pub knows_about: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct ContactPoint {
    pub contact_type: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct WebSite {
    pub name: String,
    pub description: String,
    pub url: String,
    pub publisher: OrganizationRef,
    pub potential_action: SearchAction,
    pub in_language: String,
}

/// Search endpoint descriptor.
///
/// `target` is a URL template holding the `{search_term_string}`
/// placeholder that `query_input` binds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub struct SearchAction {
    pub target: String,
    #[serde(rename = "query-input")]
    pub query_input: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Article {
    pub headline: String,
    pub description: String,
    pub url: String,
    pub date_published: String,
    pub date_modified: String,
    pub author: OrganizationRef,
    pub publisher: OrganizationRef,
    pub main_entity_of_page: WebPageRef,
    pub article_section: String,
    pub in_language: String,
    pub is_part_of: WebSiteRef,
}

/// Reference to an organization nested inside another record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Organization")]
pub struct OrganizationRef {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageObject>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub struct ImageObject {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "WebPage")]
pub struct WebPageRef {
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "WebSite")]
pub struct WebSiteRef {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct BreadcrumbList {
    pub item_list_element: Vec<ListItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub struct ListItem {
    /// 1-based position in the trail.
    pub position: usize,
    pub name: String,
    /// Absolute URL.
    pub item: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct SoftwareApplication {
    pub name: String,
    pub description: String,
    pub url: String,
    pub application_category: String,
    pub operating_system: String,
    pub offers: Offer,
    pub author: OrganizationRef,
    pub download_url: String,
    pub install_url: String,
    pub software_version: String,
    pub release_notes: String,
    pub screenshot: String,
    pub feature_list: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Offer {
    pub price: String,
    pub price_currency: String,
}

// ============================================================================
// Assemblers
// ============================================================================

/// Inputs of [`article`].
///
/// `url` is site-relative (e.g. `/docs/installation`). Missing or empty
/// dates default to the clock's current instant; a missing or empty section
/// defaults to [`DEFAULT_SECTION`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArticleInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub date_published: Option<&'a str>,
    pub date_modified: Option<&'a str>,
    pub section: Option<&'a str>,
}

/// Organization record for the site owner.
#[must_use]
pub fn organization(identity: &SiteIdentity) -> Organization {
    Organization {
        name: identity.organization.clone(),
        description: identity.description.clone(),
        url: identity.base_url.clone(),
        logo: identity.resolve(&identity.logo),
        image: identity.resolve(&identity.banner),
        same_as: identity.same_as.clone(),
        contact_point: ContactPoint {
            contact_type: "technical support".to_owned(),
            url: identity.absolute("/docs"),
        },
        founding_date: identity.founding_date.clone(),
        knows_about: identity.knows_about.clone(),
    }
}

/// WebSite record with a search action.
#[must_use]
pub fn website(identity: &SiteIdentity) -> WebSite {
    WebSite {
        name: identity.site_name.clone(),
        description: identity.site_description.clone(),
        url: identity.base_url.clone(),
        publisher: organization_ref(identity, &identity.organization, false),
        potential_action: SearchAction {
            target: format!(
                "{}?q={{search_term_string}}",
                identity.absolute(&identity.search_path)
            ),
            query_input: "required name=search_term_string".to_owned(),
        },
        in_language: identity.language.clone(),
    }
}

/// Article record for a documentation page.
#[must_use]
pub fn article(identity: &SiteIdentity, input: &ArticleInput<'_>, clock: &dyn Clock) -> Article {
    let page_url = identity.absolute(input.url);
    let (date_published, date_modified) = match (
        non_empty(input.date_published),
        non_empty(input.date_modified),
    ) {
        (Some(published), Some(modified)) => (published.to_owned(), modified.to_owned()),
        (published, modified) => {
            let now = clock.now();
            (
                published.map_or_else(|| now.clone(), str::to_owned),
                modified.map_or(now, str::to_owned),
            )
        }
    };

    Article {
        headline: input.title.to_owned(),
        description: input.description.to_owned(),
        url: page_url.clone(),
        date_published,
        date_modified,
        author: organization_ref(identity, &identity.author, false),
        publisher: organization_ref(identity, &identity.organization, true),
        main_entity_of_page: WebPageRef { id: page_url },
        article_section: non_empty(input.section)
            .unwrap_or(DEFAULT_SECTION)
            .to_owned(),
        in_language: identity.language.clone(),
        is_part_of: WebSiteRef {
            name: identity.site_name.clone(),
            url: identity.base_url.clone(),
        },
    }
}

/// BreadcrumbList record; positions are 1-based and follow input order.
#[must_use]
pub fn breadcrumb_list(identity: &SiteIdentity, trail: &[Breadcrumb]) -> BreadcrumbList {
    BreadcrumbList {
        item_list_element: trail
            .iter()
            .enumerate()
            .map(|(index, crumb)| ListItem {
                position: index + 1,
                name: crumb.name.clone(),
                item: identity.absolute(&crumb.url),
            })
            .collect(),
    }
}

/// SoftwareApplication record for the documented product.
#[must_use]
pub fn software_application(identity: &SiteIdentity) -> SoftwareApplication {
    let software = &identity.software;
    SoftwareApplication {
        name: identity.organization.clone(),
        description: software.description.clone(),
        url: identity.base_url.clone(),
        application_category: software.category.clone(),
        operating_system: software.operating_system.clone(),
        offers: Offer {
            price: "0".to_owned(),
            price_currency: "USD".to_owned(),
        },
        author: organization_ref(identity, &identity.author, false),
        download_url: software.download_url.clone(),
        install_url: software.install_url.clone(),
        software_version: software.version.clone(),
        release_notes: identity.absolute("/docs"),
        screenshot: identity.resolve(&identity.banner),
        feature_list: software.features.clone(),
    }
}

fn organization_ref(identity: &SiteIdentity, name: &str, with_logo: bool) -> OrganizationRef {
    OrganizationRef {
        name: name.to_owned(),
        url: identity.base_url.clone(),
        logo: with_logo.then(|| ImageObject {
            url: identity.resolve(&identity.logo),
        }),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
