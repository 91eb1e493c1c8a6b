//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_set_member_handler, add_zset_member_handler, get_value_handler, health_handler,
    index_handler, not_found_handler, push_list_handler, set_hash_field_handler,
    set_value_handler, view_hash_handler, view_list_handler, view_set_handler,
    view_zset_handler, visits_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Static segments (`add`, `view`) take precedence over captures at the
/// same position, so `/set/add/k/v` reaches the set-member route rather
/// than storing a scalar under `add`.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        // Strings
        .route("/set/:key/:value", get(set_value_handler))
        .route("/get/:key", get(get_value_handler))
        // Lists
        .route("/list/:key/push/:value", get(push_list_handler))
        .route("/list/:key", get(view_list_handler))
        // Sets
        .route("/set/add/:key/:value", get(add_set_member_handler))
        .route("/set/view/:key", get(view_set_handler))
        // Hashes
        .route("/hash/:key/:field/:value", get(set_hash_field_handler))
        .route("/hash/view/:key", get(view_hash_handler))
        // Sorted sets
        .route("/zset/:key/:member/:score", get(add_zset_member_handler))
        .route("/zset/view/:key", get(view_zset_handler))
        // Counter and health
        .route("/visits", get(visits_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(Store::memory()))
    }

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_index_endpoint() {
        assert_eq!(status_of(create_test_app(), "/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of(create_test_app(), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        assert_eq!(status_of(create_test_app(), "/set/a/1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        assert_eq!(
            status_of(create_test_app(), "/get/nonexistent").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_static_segment_wins_over_capture() {
        let app = create_test_app();

        // Would store the scalar "add" -> ... if the capture route matched
        assert_eq!(status_of(app.clone(), "/set/add/S/m").await, StatusCode::OK);
        assert_eq!(status_of(app.clone(), "/set/view/S").await, StatusCode::OK);
        assert_eq!(status_of(app, "/get/add").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        assert_eq!(
            status_of(create_test_app(), "/no/such/route/here").await,
            StatusCode::NOT_FOUND
        );
    }
}
