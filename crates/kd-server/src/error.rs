//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kd_site::RenderError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No page at the requested URL.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Render failure other than a missing page.
    #[error("Render error: {0}")]
    Render(RenderError),
}

impl From<RenderError> for ServerError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::PageNotFound(url) => Self::PageNotFound(url),
            other => Self::Render(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "path": path}),
            ),
            Self::Render(e) => {
                tracing::error!(error = %e, "Render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use kd_storage::StorageError;

    use super::*;

    #[test]
    fn test_page_not_found_maps_to_404() {
        let err = ServerError::from(RenderError::PageNotFound("/docs/missing".to_owned()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let err = ServerError::from(RenderError::Storage(StorageError::not_found("guide")));
        assert!(matches!(err, ServerError::Render(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
