//! Search endpoint backing the WebSite `SearchAction`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use kd_site::SearchHit;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Query string for the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Response for the search endpoint.
#[derive(Serialize)]
pub(crate) struct SearchResponse {
    query: String,
    results: Vec<SearchHit>,
}

/// Handle GET {search_path}?q=.
pub(crate) async fn get_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let results = state.site.search(&params.q);
    Json(SearchResponse {
        query: params.q,
        results,
    })
}
