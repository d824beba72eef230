//! Index route.
//!
//! Redirects users to version 1 of the API. Later this can be expanded to
//! support multiple API versions.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{routing::get, Router};

/// Creates the index routes.
pub fn index_routes() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/v1")],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_index_redirects_to_v1() {
        let app = index_routes();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/v1");
    }
}
