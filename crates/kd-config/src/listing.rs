//! Showcase and sponsor listings.
//!
//! Both lists live in `kd.toml` as arrays of tables:
//!
//! ```toml
//! [[showcase]]
//! name = "Acme Portal"
//! description = "Customer portal using Keyloom sessions"
//! url = "https://portal.acme.dev"
//! tags = ["Next.js", "Prisma"]
//!
//! [[sponsors]]
//! name = "Example Corp"
//! description = "Supporting open source authentication"
//! url = "https://example-corp.com"
//! tier = "gold"
//! ```

use serde::{Deserialize, Serialize};

/// Project built with the documented product.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShowcaseItem {
    /// Project name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Live project URL.
    pub url: String,
    /// Logo or screenshot URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Technology tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Sponsorship level, highest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorTier {
    Platinum,
    Gold,
    Silver,
    Bronze,
}

impl SponsorTier {
    /// Lowercase tier name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Platinum => "platinum",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

/// Sponsor or supporter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SponsorItem {
    /// Sponsor or organization name.
    pub name: String,
    /// Description of the sponsor or their sponsorship.
    pub description: String,
    /// Sponsor website.
    pub url: String,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Sponsorship tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<SponsorTier>,
}

/// Order sponsors by tier (platinum first, untiered last).
///
/// The sort is stable: sponsors of the same tier keep their configured order.
pub fn sort_by_tier(sponsors: &mut [SponsorItem]) {
    sponsors.sort_by_key(|s| (s.tier.is_none(), s.tier));
}
