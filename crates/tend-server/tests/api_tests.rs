use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tend_core::RoutineStoreBuilder;
use tend_server::{build_router, AppState};
use tower::ServiceExt;

/// Helper function to create a router over a fresh database
async fn create_test_app() -> (TempDir, Router) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = RoutineStoreBuilder::new()
        .with_database_path(temp_dir.path().join("test.db"))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, build_router(AppState { store }))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn morning() -> Value {
    json!({
        "id": "morning",
        "title": "Morning",
        "description": "Wake up gently",
        "category": "morning",
        "steps": [
            { "id": "s1", "title": "Stretch", "duration": 5, "completed": false },
            { "id": "s2", "title": "Meditate", "duration": 10, "completed": false,
              "musicUrl": "https://open.spotify.com/playlist/calm", "musicPlatform": "spotify" }
        ]
    })
}

#[tokio::test]
async fn test_create_then_list() {
    let (_temp_dir, app) = create_test_app().await;

    let (status, created) = send(&app, Method::POST, "/routines", Some(morning())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "morning");
    assert_eq!(created["steps"][1]["musicPlatform"], "spotify");
    assert!(created["createdAt"].is_string());

    let (status, list) = send(&app, Method::GET, "/routines", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0], created);
}

#[tokio::test]
async fn test_api_prefix_serves_same_routes() {
    let (_temp_dir, app) = create_test_app().await;

    let (status, _) = send(&app, Method::POST, "/api/routines", Some(morning())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(&app, Method::GET, "/routines", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, routine) = send(&app, Method::GET, "/api/routines/morning", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(routine["title"], "Morning");
}

#[tokio::test]
async fn test_create_missing_duration_is_bad_request() {
    let (_temp_dir, app) = create_test_app().await;

    let body = json!({ "title": "Broken", "steps": [{ "title": "No duration" }] });
    let (status, error) = send(&app, Method::POST, "/routines", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "invalid_input");

    let (_, list) = send(&app, Method::GET, "/routines", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (_temp_dir, app) = create_test_app().await;

    for body in [
        json!({ "title": "" }),
        json!({ "title": "Brunch", "category": "brunch" }),
        json!({ "title": "Capitalized", "category": "Morning" }),
        json!({ "title": "Zero", "steps": [{ "title": "Nap", "duration": 0 }] }),
        json!({ "title": "Huge", "steps": [{ "title": "Hibernate", "duration": 3_000_000_000u32 }] }),
        json!({ "title": "Dupes", "steps": [
            { "id": "a", "title": "One", "duration": 1 },
            { "id": "a", "title": "Two", "duration": 1 }
        ] }),
    ] {
        let (status, error) = send(&app, Method::POST, "/routines", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(error["error"], "invalid_input");
        assert!(error["message"].is_string());
    }
}

#[tokio::test]
async fn test_create_without_ids_assigns_them() {
    let (_temp_dir, app) = create_test_app().await;

    let body = json!({ "title": "Quick", "steps": [{ "title": "Breathe", "duration": 1 }] });
    let (status, created) = send(&app, Method::POST, "/routines", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert!(!created["steps"][0]["id"].as_str().unwrap().is_empty());
    assert_eq!(created["category"], "custom");
    assert_eq!(created["steps"][0]["completed"], false);
}

#[tokio::test]
async fn test_delete_routine() {
    let (_temp_dir, app) = create_test_app().await;
    send(&app, Method::POST, "/routines", Some(morning())).await;

    let (status, body) = send(&app, Method::DELETE, "/routines/morning", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, error) = send(&app, Method::DELETE, "/routines/morning", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "routine_not_found");

    let (_, list) = send(&app, Method::GET, "/routines", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_patch_step_completion() {
    let (_temp_dir, app) = create_test_app().await;
    send(&app, Method::POST, "/routines", Some(morning())).await;

    let (status, routine) = send(
        &app,
        Method::PATCH,
        "/routines/morning/steps/s2",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(routine["steps"][0]["completed"], false);
    assert_eq!(routine["steps"][1]["completed"], true);

    let (status, error) = send(
        &app,
        Method::PATCH,
        "/routines/morning/steps/nope",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "step_not_found");

    let (status, error) = send(
        &app,
        Method::PATCH,
        "/routines/ghost/steps/s1",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "routine_not_found");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/routines/morning/steps/s1",
        Some(json!({ "completed": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_replaces_document() {
    let (_temp_dir, app) = create_test_app().await;
    let (_, created) = send(&app, Method::POST, "/routines", Some(morning())).await;

    let mut edited = morning();
    edited["title"] = json!("Slow morning");
    edited["steps"].as_array_mut().unwrap().remove(0);

    let (status, replaced) = send(&app, Method::PUT, "/routines/morning", Some(edited)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["title"], "Slow morning");
    assert_eq!(replaced["steps"].as_array().unwrap().len(), 1);
    assert_eq!(replaced["createdAt"], created["createdAt"]);

    let (status, _) = send(&app, Method::PUT, "/routines/ghost", Some(json!({ "title": "Ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_routine() {
    let (_temp_dir, app) = create_test_app().await;

    let (status, error) = send(&app, Method::GET, "/routines/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "routine_not_found");
}

#[tokio::test]
async fn test_healthz() {
    let (_temp_dir, app) = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
