//! HTTP Router

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::di::AppState;

use super::handlers::{couriers, orders};

async fn ping() -> &'static str {
    "pong"
}

/// Build the service router over the shared application state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        // courier methods
        .route("/couriers", post(couriers::create).get(couriers::list))
        .route("/couriers/assignments", get(couriers::assignments))
        .route("/couriers/meta-info/:courier_id", get(couriers::meta))
        .route("/couriers/:courier_id", get(couriers::get_by_id))
        // order methods
        .route("/orders", post(orders::create).get(orders::list))
        .route("/orders/complete", post(orders::complete))
        .route("/orders/assign", post(orders::assign))
        .route("/orders/:order_id", get(orders::get_by_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    async fn test_router() -> Router {
        // MockDatabase-backed state; only routes that never reach the
        // database are exercised here
        let db = sea_orm::DatabaseConnection::default();
        build_router(Arc::new(AppState { db }))
    }

    #[tokio::test]
    async fn test_ping_pongs() {
        let router = test_router().await;

        let response = router
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"pong");
    }

    #[tokio::test]
    async fn test_non_numeric_courier_id_is_bad_request() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/couriers/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_meta_requires_dates() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/couriers/meta-info/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_negative_offset_is_bad_request() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/couriers?offset=-1&limit=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
