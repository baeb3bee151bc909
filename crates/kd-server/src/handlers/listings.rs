//! Showcase and sponsors pages.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /showcase.
pub(crate) async fn get_showcase(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    Ok(Html(state.site.showcase_html()?))
}

/// Handle GET /sponsors.
pub(crate) async fn get_sponsors(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    Ok(Html(state.site.sponsors_html()?))
}
