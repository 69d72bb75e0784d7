use axum::{Extension, Json, Router, routing::get};
use pricewatch_core::controller::Controller;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app::controller::{
    EmailController, HealthController, ProductController, SubscriptionController,
    TelegramController,
};
use crate::app::state::AppState;
use crate::docs::MainApiDoc;

/// Assemble the full application router.
///
/// Group mounting order follows the prefix table: the `/api` groups
/// first, then health merged at the root, then the exact root route.
/// The static directory answers anything no route claims.
pub fn routes(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();

    Router::new()
        .nest("/api", EmailController::router())
        .nest("/api/products", ProductController::router())
        .nest("/api", SubscriptionController::router())
        .nest("/api/telegram", TelegramController::router())
        .merge(HealthController::router())
        .route("/", get(root))
        .route("/api/docs/openapi.json", get(openapi))
        .fallback_service(ServeDir::new(public_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

async fn root() -> &'static str {
    "Testing Route"
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(MainApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use tower::ServiceExt;

    use super::*;
    use crate::app::model::product;
    use crate::config::app::AppConfig;

    fn test_config() -> AppConfig {
        AppConfig {
            port: 3000,
            database_url: "postgres://localhost/pricewatch-test".into(),
            product_api_url: "http://localhost:9/products".into(),
            fetch_interval: Duration::from_secs(3600),
            public_dir: "public".into(),
            smtp: None,
            telegram_bot_token: None,
        }
    }

    fn test_state(db: DatabaseConnection) -> AppState {
        AppState::new(test_config(), db, reqwest::Client::new(), None, None)
    }

    fn empty_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    #[tokio::test]
    async fn root_answers_with_the_literal_body() {
        let app = routes(test_state(empty_db()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Testing Route");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = routes(test_state(empty_db()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["database"], "up");
    }

    #[tokio::test]
    async fn products_list_answers_under_the_api_prefix() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product::Model {
                id: 1,
                external_id: "p-1".into(),
                name: "Mechanical Keyboard".into(),
                url: "https://shop.example/p-1".into(),
                price: pricewatch_core::model::Price::new(129.99, "EUR"),
                last_checked_at: chrono::Utc::now(),
                created_at: chrono::Utc::now(),
            }]])
            .into_connection();

        let app = routes(test_state(db));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["products"][0]["external_id"], "p-1");
        assert_eq!(parsed["products"][0]["price"]["currency"], "EUR");
    }

    #[tokio::test]
    async fn invalid_subscription_is_rejected_before_the_database() {
        let app = routes(test_state(empty_db()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/subscriptions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"product_id": 1, "channel": "email", "recipient": "   ", "target_price": 10.0}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn mounting_twice_dispatches_identically() {
        // Building the router is pure: a second pass over the same
        // groups serves the same prefixes.
        for _ in 0..2 {
            let app = routes(test_state(empty_db()));

            for (path, expected) in [
                ("/", StatusCode::OK),
                ("/health", StatusCode::OK),
                ("/api/telegram/status", StatusCode::OK),
            ] {
                let response = app
                    .clone()
                    .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                    .await
                    .unwrap();

                assert_eq!(response.status(), expected, "{path}");
            }
        }
    }

    #[tokio::test]
    async fn unknown_paths_fall_through_to_the_static_dir() {
        let app = routes(test_state(empty_db()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/no-such-file.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = routes(test_state(empty_db()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let paths = parsed["paths"].as_object().unwrap();
        assert!(paths.keys().any(|path| path.contains("/subscriptions")));
    }
}
