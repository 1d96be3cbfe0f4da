//! HTTP-level tests driving the router against an in-memory SurrealDB.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{
        Method, Request, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN},
    },
};
use campusspot_db::repository::{SurrealReviewRepository, SurrealSpotRepository};
use campusspot_server::{app, config::Config, cors_layer, state::AppState};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

/// Helper: router over a fresh in-memory database.
async fn setup_with(cors: CorsLayer) -> Router {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    campusspot_db::run_migrations(&db).await.unwrap();

    let state = AppState::new(
        SurrealSpotRepository::new(db.clone()),
        SurrealReviewRepository::new(db),
    );
    app(state, cors)
}

async fn setup() -> Router {
    setup_with(CorsLayer::new()).await
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_spot(router: &Router, body: Value) -> Value {
    let (status, spot) = send(router, Method::POST, "/api/spots", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    spot
}

// -----------------------------------------------------------------------
// Spots
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_then_get_spot() {
    let router = setup().await;

    let created = create_spot(
        &router,
        json!({
            "name": "Corner Table",
            "building": "Library",
            "floor": "2nd Floor",
            "hasOutlet": true,
            "noiseLevel": "moderate"
        }),
    )
    .await;

    assert_eq!(created["likes"], 0);
    assert!(created["createdAt"].is_string());
    let id = created["_id"].as_str().unwrap();

    let (status, fetched) = send(&router, Method::GET, &format!("/api/spots/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], "Corner Table");
    assert_eq!(fetched["building"], "Library");
    assert_eq!(fetched["floor"], "2nd Floor");
    assert_eq!(fetched["hasOutlet"], true);
    assert_eq!(fetched["noiseLevel"], "moderate");
}

#[tokio::test]
async fn list_spots_newest_first() {
    let router = setup().await;

    for name in ["A", "B", "C"] {
        create_spot(&router, json!({ "name": name })).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, spots) = send(&router, Method::GET, "/api/spots", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<_> = spots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["C", "B", "A"]);
}

#[tokio::test]
async fn update_spot_merges_fields_and_acks() {
    let router = setup().await;
    let created = create_spot(
        &router,
        json!({ "name": "Before", "building": "Arts Hall", "noiseLevel": "noisy" }),
    )
    .await;
    let uri = format!("/api/spots/{}", created["_id"].as_str().unwrap());

    let (status, body) = send(&router, Method::PUT, &uri, Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Spot updated successfully" }));

    let (_, fetched) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(fetched["name"], "X");
    assert_eq!(fetched["building"], "Arts Hall");
    assert_eq!(fetched["noiseLevel"], "noisy");
    assert_eq!(fetched["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_missing_spot_is_404() {
    let router = setup().await;
    let uri = format!("/api/spots/{}", Uuid::new_v4());

    let (status, body) = send(&router, Method::PUT, &uri, Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Spot not found");
}

#[tokio::test]
async fn delete_spot_then_get_is_404() {
    let router = setup().await;
    let created = create_spot(&router, json!({ "name": "Doomed" })).await;
    let uri = format!("/api/spots/{}", created["_id"].as_str().unwrap());

    let (status, body) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Spot deleted successfully" }));

    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Spot not found");

    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_fails_by_operation_kind() {
    let router = setup().await;
    let uri = "/api/spots/not-a-valid-id";

    let (status, body) = send(&router, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());

    let (status, _) = send(&router, Method::PUT, uri, Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_spot_payload_is_400() {
    let router = setup().await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/spots",
        Some(json!({ "noiseLevel": "deafening" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/spots",
        Some(json!({ "hasOutlet": "sometimes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -----------------------------------------------------------------------
// Reviews
// -----------------------------------------------------------------------

#[tokio::test]
async fn review_for_unknown_spot_is_listed() {
    let router = setup().await;
    let spot_id = Uuid::new_v4().to_string();

    let (status, created) = send(
        &router,
        Method::POST,
        "/api/reviews",
        Some(json!({
            "spotId": spot_id,
            "rating": 4,
            "comment": "Outlets are conveniently located."
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["spotId"], spot_id.as_str());
    assert_eq!(created["rating"], 4);
    assert!(created["_id"].is_string());
    assert!(created["createdAt"].is_string());

    let (status, reviews) = send(
        &router,
        Method::GET,
        &format!("/api/reviews/spot/{spot_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0], created);
}

#[tokio::test]
async fn reviews_for_spot_without_reviews_is_empty_list() {
    let router = setup().await;

    let (status, reviews) = send(&router, Method::GET, "/api/reviews/spot/anything", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews, json!([]));
}

#[tokio::test]
async fn invalid_review_payload_is_400() {
    let router = setup().await;

    for body in [
        json!({ "spotId": "s", "rating": 9, "comment": "too good" }),
        json!({ "spotId": "s", "rating": 3, "comment": "x".repeat(501) }),
        json!({ "spotId": "s", "rating": 3 }),
    ] {
        let (status, response) = send(&router, Method::POST, "/api/reviews", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["message"].is_string());
    }

    let (_, reviews) = send(&router, Method::GET, "/api/reviews/spot/s", None).await;
    assert_eq!(reviews, json!([]), "rejected reviews must not be stored");
}

// -----------------------------------------------------------------------
// Ambient
// -----------------------------------------------------------------------

#[tokio::test]
async fn health_check() {
    let router = setup().await;

    let (status, body) = send(&router, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let config = Config::from_lookup(|_| None).unwrap();
    let router = setup_with(cors_layer(&config)).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/spots")
        .header(ORIGIN, "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/spots")
        .header(ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
