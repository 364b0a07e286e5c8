//! CORS policy for the Web API.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer from the configured origin list.
///
/// With no usable origins the layer is wide open but credential-free, which
/// suits local development. Explicit origins switch on credentials mode with
/// a fixed request-header allowlist; origins that fail to parse as header
/// values are skipped.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    if allowed.is_empty() {
        return CorsLayer::new()
            .allow_methods(METHODS)
            .allow_headers(Any)
            .allow_origin(Any);
    }

    CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
    };
    use axum::http::Request;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(ORIGIN, origin)
            .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    }

    fn app(origins: &[String]) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(create_cors_layer(origins))
    }

    #[tokio::test]
    async fn test_configured_origin_gets_credentials_mode() {
        let origins = vec!["http://localhost:3000".to_string()];
        let response = app(&origins)
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_empty_config_is_permissive_without_credentials() {
        let response = app(&[])
            .oneshot(preflight("http://anywhere.example"))
            .await
            .unwrap();

        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(!response
            .headers()
            .contains_key(ACCESS_CONTROL_ALLOW_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_unlisted_origin_not_echoed() {
        let origins = vec!["http://localhost:3000".to_string()];
        let response = app(&origins)
            .oneshot(preflight("http://evil.example"))
            .await
            .unwrap();

        assert!(!response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[test]
    fn test_unparseable_origins_fall_back_to_dev_mode() {
        let origins = vec!["not a header value\u{7f}".to_string()];
        let _layer = create_cors_layer(&origins);
    }
}
