//! # CORS
//!
//! Builds the [`CorsLayer`] from [`CorsConfig`]. The mobile client and the
//! web dashboard send `Authorization: Bearer ...`, so that header is always
//! allowed.
//!
//! An empty origin list, or one containing `*`, allows any origin.
//! Credentialed requests are not allowed.
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use varsityhub_api::config::web::CorsConfig;
//! use varsityhub_api::web::cors::build_cors;
//!
//! let cfg = CorsConfig {
//!     origins: vec!["https://app.varsityhub.example".into()],
//! };
//!
//! let app: Router = Router::new()
//!     .route("/health", get(|| async { "ok" }))
//!     .layer(build_cors(&cfg));
//! ```

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::web::CorsConfig;

/// Converts configured origins to header values; invalid entries are skipped.
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
        .collect()
}

pub fn build_cors(cors: &CorsConfig) -> CorsLayer {
    let origin = if cors.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_origins(&cors.origins))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn app(cfg: &CorsConfig) -> Router {
        Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(build_cors(cfg))
    }

    fn header_str<'a>(res: &'a axum::response::Response, name: &str) -> Option<&'a str> {
        res.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn parse_origins_skips_invalid_values() {
        let out = parse_origins(&["http://a.com".into(), "bad\nvalue".into(), " https://b.com ".into()]);
        let strings: Vec<&str> = out.iter().map(|h| h.to_str().unwrap()).collect();

        assert_eq!(strings, vec!["http://a.com", "https://b.com"]);
    }

    #[tokio::test]
    async fn preflight_allows_listed_origin_and_authorization() {
        let cfg = CorsConfig {
            origins: vec!["http://example.com".into()],
        };

        let req = Request::builder()
            .method("OPTIONS")
            .uri("/test")
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "authorization, content-type")
            .body(Body::empty())
            .unwrap();

        let res = app(&cfg).oneshot(req).await.unwrap();

        assert!(res.status().is_success(), "unexpected status: {}", res.status());
        assert_eq!(
            header_str(&res, "access-control-allow-origin"),
            Some("http://example.com")
        );
        let allow_headers = header_str(&res, "access-control-allow-headers")
            .unwrap()
            .to_ascii_lowercase();
        assert!(allow_headers.contains("authorization"));
        assert!(allow_headers.contains("content-type"));
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_allow_origin() {
        let cfg = CorsConfig {
            origins: vec!["http://example.com".into()],
        };

        let req = Request::builder()
            .uri("/test")
            .header("Origin", "http://evil.example")
            .body(Body::empty())
            .unwrap();

        let res = app(&cfg).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(header_str(&res, "access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn wildcard_allows_any_origin() {
        let cfg = CorsConfig {
            origins: vec!["*".into()],
        };

        let req = Request::builder()
            .uri("/test")
            .header("Origin", "http://anything.example")
            .body(Body::empty())
            .unwrap();

        let res = app(&cfg).oneshot(req).await.unwrap();
        assert_eq!(header_str(&res, "access-control-allow-origin"), Some("*"));
        assert!(header_str(&res, "access-control-allow-credentials").is_none());
    }

    #[tokio::test]
    async fn listed_origin_is_never_credentialed() {
        let cfg = CorsConfig {
            origins: vec!["http://dash.example".into()],
        };

        let req = Request::builder()
            .uri("/test")
            .header("Origin", "http://dash.example")
            .body(Body::empty())
            .unwrap();

        let res = app(&cfg).oneshot(req).await.unwrap();
        assert_eq!(
            header_str(&res, "access-control-allow-origin"),
            Some("http://dash.example")
        );
        assert!(header_str(&res, "access-control-allow-credentials").is_none());
    }
}
