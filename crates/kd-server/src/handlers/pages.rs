//! Documentation page endpoints.
//!
//! Serves rendered HTML pages with `ETag`/`Last-Modified` validators and the
//! plain-text `.mdx` export of each page.

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{AppendHeaders, Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::state::AppState;

/// Suffix selecting the plain-text export of a page.
const MARKDOWN_SUFFIX: &str = ".mdx";

/// Handle GET /docs.
pub(crate) async fn get_docs_root(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    docs_page("", &state, &headers)
}

/// Handle GET /docs.mdx.
pub(crate) async fn get_docs_root_markdown(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    markdown_page("", &state)
}

/// Handle GET /docs/{*slug}, including `{slug}.mdx`.
pub(crate) async fn get_docs_page(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    match slug.strip_suffix(MARKDOWN_SUFFIX) {
        Some(slug) => markdown_page(slug, &state),
        None => docs_page(&slug, &state, &headers),
    }
}

/// Handle GET /.
pub(crate) async fn get_home(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    Ok(Html(state.site.home_html()?).into_response())
}

fn docs_page(slug: &str, state: &AppState, headers: &HeaderMap) -> Result<Response, ServerError> {
    let page = state.site.render(slug)?;
    let html = state.site.page_html(&page)?;

    let etag = compute_etag(&state.version, &html);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let mut validators: Vec<(HeaderName, String)> = vec![
        (header::ETAG, etag),
        (header::CACHE_CONTROL, "public, max-age=60".to_owned()),
    ];
    if let Some(last_modified) = http_date(page.source_mtime) {
        validators.push((header::LAST_MODIFIED, last_modified));
    }

    Ok((AppendHeaders(validators), Html(html)).into_response())
}

fn markdown_page(slug: &str, state: &AppState) -> Result<Response, ServerError> {
    let text = state.site.llm_text(slug)?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        text,
    )
        .into_response())
}

/// Format a Unix timestamp as an HTTP date. Unknown (zero) times yield `None`.
fn http_date(mtime: f64) -> Option<String> {
    if mtime <= 0.0 || !mtime.is_finite() {
        return None;
    }
    let last_modified: DateTime<Utc> = (UNIX_EPOCH + Duration::from_secs_f64(mtime)).into();
    Some(
        last_modified
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
    )
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", "content");
        let etag2 = compute_etag("1.0.1", "content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_http_date() {
        assert_eq!(
            http_date(1_700_000_000.0).as_deref(),
            Some("Tue, 14 Nov 2023 22:13:20 GMT")
        );
    }

    #[test]
    fn test_http_date_unknown() {
        assert_eq!(http_date(0.0), None);
    }
}
