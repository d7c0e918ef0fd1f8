use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// CORS policy for browser clients of the ticketing API.
///
/// Origins that do not parse as header values are skipped with a warning.
/// An empty list after parsing opens the API to any origin.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin_policy(origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE)
}

fn origin_policy(origins: &[String]) -> AllowOrigin {
    let mut accepted = Vec::with_capacity(origins.len());
    for origin in origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => accepted.push(value),
            Err(e) => tracing::warn!(origin = %origin, error = %e, "CORS: skipping invalid origin"),
        }
    }

    if accepted.is_empty() {
        tracing::warn!("CORS: no valid origins configured, allowing any origin");
        return AllowOrigin::any();
    }
    tracing::info!(count = accepted.len(), "CORS: origin allow-list configured");
    AllowOrigin::list(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{split_origins, DEFAULT_ALLOWED_ORIGINS};
    use axum::body::Body;
    use axum::http::{Request, Response};
    use std::convert::Infallible;
    use tower::{service_fn, Layer, ServiceExt};

    async fn preflight(origins: &[String], origin: &str) -> Response<Body> {
        let service = create_cors_layer(origins).layer(service_fn(|_req: Request<Body>| async {
            Ok::<_, Infallible>(Response::new(Body::empty()))
        }));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/reservations")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        service.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed() {
        let origins = vec!["http://localhost:3000".to_string()];
        let response = preflight(&origins, "http://localhost:3000").await;
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_allow_header() {
        let origins = vec!["http://localhost:3000".to_string()];
        let response = preflight(&origins, "http://evil.test").await;
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_empty_list_allows_any_origin() {
        let response = preflight(&[], "http://anywhere.test").await;
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_default_origins_are_valid() {
        for origin in split_origins(DEFAULT_ALLOWED_ORIGINS) {
            assert!(
                HeaderValue::from_str(&origin).is_ok(),
                "Default origin '{}' should be a valid HeaderValue",
                origin
            );
        }
    }
}
