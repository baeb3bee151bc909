//! Source of the "current instant" used for default timestamps.
//!
//! Article dates, Open Graph times and sitemap `lastmod` values fall back to
//! "now" when a page does not declare them. The instant is injected through
//! [`Clock`] so that assembling records stays deterministic under test.

use chrono::{SecondsFormat, Utc};

/// Provides the current instant as an ISO-8601 string.
pub trait Clock: Send + Sync {
    /// Current instant, e.g. `2025-01-01T12:00:00.000Z`.
    fn now(&self) -> String;
}

/// Wall clock in UTC with millisecond precision.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Clock frozen at a given instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedClock {
    instant: String,
}

impl FixedClock {
    /// Create a clock that always reports `instant`.
    #[must_use]
    pub fn new(instant: impl Into<String>) -> Self {
        Self {
            instant: instant.into(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.instant.clone()
    }
}
