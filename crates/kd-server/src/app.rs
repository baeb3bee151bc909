//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let search_path = state.site.identity().search_path.clone();

    let page_routes = Router::new()
        .route("/", get(handlers::pages::get_home))
        .route("/docs", get(handlers::pages::get_docs_root))
        .route("/docs.mdx", get(handlers::pages::get_docs_root_markdown))
        .route("/docs/{*slug}", get(handlers::pages::get_docs_page))
        .route("/showcase", get(handlers::listings::get_showcase))
        .route("/sponsors", get(handlers::listings::get_sponsors));

    let seo_routes = Router::new()
        .route("/sitemap.xml", get(handlers::seo::get_sitemap))
        .route("/robots.txt", get(handlers::seo::get_robots))
        .route("/llms-full.txt", get(handlers::seo::get_llms_full))
        .route(&search_path, get(handlers::search::get_search));

    Router::new()
        .merge(page_routes)
        .merge(seo_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(security::referrer_policy_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use kd_seo::FixedClock;
    use kd_site::{Site, SiteConfig};
    use kd_storage::{Document, MockStorage};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        let storage = MockStorage::new()
            .with_page("", "Introduction", "Welcome.")
            .with_document(
                Document {
                    path: "guides/oauth".to_owned(),
                    title: "OAuth Providers".to_owned(),
                    description: Some("Configure GitHub sign-in".to_owned()),
                    ..Default::default()
                },
                "## GitHub\n\nCreate an app.\n",
            )
            .with_mtime("guides/oauth", 1_700_000_000.0);
        let site = Site::with_clock(
            Arc::new(storage),
            SiteConfig::default(),
            Arc::new(FixedClock::new("2025-03-01T10:00:00.000Z")),
        );
        create_router(Arc::new(AppState {
            site: Arc::new(site),
            version: "1.0.0".to_owned(),
        }))
    }

    async fn get(uri: &str) -> axum::response::Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        router().oneshot(req).await.unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_docs_page() {
        let resp = get("/docs/guides/oauth").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(header::ETAG));
        assert_eq!(
            resp.headers()[header::LAST_MODIFIED],
            "Tue, 14 Nov 2023 22:13:20 GMT"
        );
        assert_eq!(resp.headers()["x-frame-options"], "DENY");

        let html = body_text(resp).await;
        assert!(html.contains("<title>OAuth Providers | Keyloom</title>"));
        assert!(html.contains("\"@type\":\"BreadcrumbList\""));
    }

    #[tokio::test]
    async fn test_docs_page_not_modified() {
        let etag = get("/docs/guides/oauth").await.headers()[header::ETAG].clone();

        let req = Request::builder()
            .uri("/docs/guides/oauth")
            .header(header::IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap();
        let resp = router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_docs_root_without_mtime() {
        let resp = get("/docs").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key(header::LAST_MODIFIED));
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let resp = get("/docs/missing").await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(body["path"], "/docs/missing");
    }

    #[tokio::test]
    async fn test_markdown_export() {
        let resp = get("/docs/guides/oauth.mdx").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/markdown; charset=utf-8"
        );
        assert_eq!(
            body_text(resp).await,
            "# OAuth Providers\nURL: /docs/guides/oauth\n\n## GitHub\n\nCreate an app."
        );
    }

    #[tokio::test]
    async fn test_root_markdown_export() {
        let text = body_text(get("/docs.mdx").await).await;
        assert!(text.starts_with("# Introduction\nURL: /docs\n"));
    }

    #[tokio::test]
    async fn test_home_and_listings() {
        for uri in ["/", "/showcase", "/sponsors"] {
            let resp = get(uri).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            assert!(resp.headers().contains_key("content-security-policy"));
        }
    }

    #[tokio::test]
    async fn test_sitemap_and_robots() {
        let resp = get("/sitemap.xml").await;
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/xml; charset=utf-8"
        );
        assert!(body_text(resp).await.contains("/docs/guides/oauth</loc>"));

        let robots = body_text(get("/robots.txt").await).await;
        assert!(robots.contains("Sitemap: https://keyloom.markdegraaff.com/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_llms_full() {
        let text = body_text(get("/llms-full.txt").await).await;
        assert!(text.starts_with("# Introduction\nURL: /docs\n"));
        assert!(text.contains("URL: /docs/guides/oauth"));
    }

    #[tokio::test]
    async fn test_search() {
        let resp = get("/api/search?q=github").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(body["query"], "github");
        assert_eq!(body["results"][0]["url"], "/docs/guides/oauth");
    }

    #[tokio::test]
    async fn test_search_without_query() {
        let body: serde_json::Value =
            serde_json::from_str(&body_text(get("/api/search").await).await).unwrap();
        assert_eq!(body["results"], serde_json::json!([]));
    }
}
