//! Crawler and language-model endpoints: sitemap, robots.txt, llms-full.txt.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /sitemap.xml.
pub(crate) async fn get_sitemap(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let xml = state.site.sitemap_xml()?;
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}

/// Handle GET /robots.txt.
pub(crate) async fn get_robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.site.robots_txt(),
    )
}

/// Handle GET /llms-full.txt.
pub(crate) async fn get_llms_full(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let text = state.site.llms_full()?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
