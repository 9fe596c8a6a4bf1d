//! HTTP integration tests for the room server API.
//!
//! Builds the router in-process and drives it with `tower::ServiceExt`;
//! no listening socket is involved.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use monopoly::{SessionRegistry, StaticDirectory};
use mp_server::api::{AppState, create_router};
use mp_server::config::ServerConfig;
use tower::ServiceExt;

fn test_app() -> Router {
    let directory = Arc::new(StaticDirectory::new());
    let registry = Arc::new(SessionRegistry::new(directory.clone()));
    let config = ServerConfig {
        bind: "127.0.0.1:0".parse().unwrap(),
        starting_cash: 1_500,
        dice_seed: Some(7),
    };

    create_router(AppState {
        registry,
        directory,
        config,
    })
}

fn create_room_request(room_id: &str) -> Request<Body> {
    let body = serde_json::json!({
        "room_id": room_id,
        "players": [
            { "user_name": "alice", "full_name": "Alice Liddell" },
            { "user_name": "bob" },
        ],
    });

    Request::builder()
        .method("POST")
        .uri("/api/rooms")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_returns_ok() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_room_then_snapshot() {
    let app = test_app();

    let response = app.clone().oneshot(create_room_request("r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["room_id"], "r1");
    assert_eq!(body["players"], serde_json::json!(["alice", "bob"]));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rooms/r1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = json_body(response).await;
    assert_eq!(snapshot["players"], serde_json::json!(["alice", "bob"]));
    assert_eq!(snapshot["cash"], serde_json::json!([1_500, 1_500]));
    assert_eq!(snapshot["current_player"], "alice");
    assert_eq!(snapshot["awaiting_decision"], false);
}

#[tokio::test]
async fn test_create_duplicate_room_conflicts() {
    let app = test_app();

    let response = app.clone().oneshot(create_room_request("r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(create_room_request("r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_room_needs_two_players() {
    let app = test_app();

    let body = serde_json::json!({
        "room_id": "solo",
        "players": [{ "user_name": "alice" }],
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rooms")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_room_rejects_duplicate_names() {
    let app = test_app();

    let body = serde_json::json!({
        "room_id": "twins",
        "players": [{ "user_name": "alice" }, { "user_name": "alice" }],
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rooms")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_snapshot_of_unknown_room_is_not_found() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rooms/never-created")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_close_room_removes_it() {
    let app = test_app();

    let response = app.clone().oneshot(create_room_request("r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/rooms/r1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rooms/r1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_websocket_route_requires_upgrade() {
    let app = test_app();

    let response = app.clone().oneshot(create_room_request("r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // plain GET without upgrade headers never reaches the room
    let response = app
        .oneshot(
            Request::builder()
                .uri("/ws/r1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response.status().is_client_error(),
        "WebSocket route without upgrade should fail, got: {}",
        response.status()
    );
}
