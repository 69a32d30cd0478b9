use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use tower::ServiceExt;
use uuid::Uuid;

use foodgram_recipes::infra::media::LocalMediaStorage;
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;
use foodgram_recipes_schema::recipes;
use foodgram_testing::auth::MockAuth;

fn router() -> Router {
    router_with(DatabaseConnection::Disconnected)
}

fn router_with(db: DatabaseConnection) -> Router {
    build_router(AppState {
        db,
        media: LocalMediaStorage::new(std::env::temp_dir().join("foodgram-router-test")),
        media_url: "/media".into(),
        public_url: "http://localhost:3113".into(),
    })
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    let response = router()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let response = router()
        .oneshot(Request::get("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_require_identity_to_create_recipe() {
    let request = Request::post("/recipes")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"Soup"}"#))
        .unwrap();

    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_list_filter() {
    let request = Request::get("/recipes?is_favorited=maybe")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_hide_storage_failure_behind_internal_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".into())])
        .into_connection();
    let request = MockAuth::random()
        .apply(Request::get("/users/me"))
        .body(Body::empty())
        .unwrap();

    let response = router_with(db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "INTERNAL");
    assert_eq!(body["message"], "internal error");
}

#[tokio::test]
async fn should_redirect_short_link_to_recipe() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![recipes::Model {
            id: 42,
            author_id: Uuid::new_v4(),
            name: "Soup".into(),
            text: "Boil".into(),
            image: "recipes/soup.png".into(),
            cooking_time: 20,
            short_code: Some("G".into()),
            published_at: chrono::Utc::now(),
        }]])
        .into_connection();

    let response = router_with(db)
        .oneshot(Request::get("/r/G/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "/recipes/42/");
}

#[tokio::test]
async fn should_report_unknown_short_link() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<recipes::Model>::new()])
        .into_connection();

    let response = router_with(db)
        .oneshot(Request::get("/r/zzz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
