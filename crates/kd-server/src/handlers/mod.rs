//! HTTP request handlers.

pub(crate) mod listings;
pub(crate) mod pages;
pub(crate) mod search;
pub(crate) mod seo;
