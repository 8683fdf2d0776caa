//! HTTP API tests: bind the router to an ephemeral port and drive it with reqwest.

use axum::routing::get;
use axum::Router;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use students_api::transport::http::{self, AppState};
use students_api::{InMemoryStorage, SqliteStorage, Storage};

async fn spawn_app(storage: Arc<dyn Storage>) -> Result<String, Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = http::create_router(AppState::new(storage));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://{}", addr))
}

async fn spawn_in_memory() -> Result<String, Box<dyn std::error::Error>> {
    spawn_app(Arc::new(InMemoryStorage::new())).await
}

#[tokio::test]
async fn post_with_empty_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/students", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("empty body"));
    Ok(())
}

#[tokio::test]
async fn post_without_age_names_the_field() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/students", base_url))
        .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await?;
    assert_eq!(
        body["fields"],
        json!([{ "field": "age", "reason": "required" }])
    );
    assert!(body["error"].as_str().unwrap_or_default().contains("age"));
    Ok(())
}

#[tokio::test]
async fn post_with_zero_age_fails_validation() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/students", base_url))
        .json(&json!({ "name": "Baby", "email": "baby@example.com", "age": 0 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["fields"][0]["field"], json!("age"));
    Ok(())
}

#[tokio::test]
async fn post_with_malformed_json_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/students", base_url))
        .header("content-type", "application/json")
        .body("{\"name\": \"Ada\",")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("invalid JSON body"));
    assert!(body.get("fields").is_none());
    Ok(())
}

#[tokio::test]
async fn empty_listing_is_an_empty_array() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;

    let resp = reqwest::get(format!("{}/api/students", base_url)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn full_lifecycle_against_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let storage = SqliteStorage::open(dir.path().join("students.db")).await?;
    let base_url = spawn_app(Arc::new(storage)).await?;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(format!("{}/api/students", base_url))
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "age": 36 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();
    assert!(location.starts_with("/api/students/"));
    assert_eq!(resp.json::<Value>().await?, json!({ "success": true }));

    // List
    let list: Value = reqwest::get(format!("{}/api/students", base_url))
        .await?
        .json()
        .await?;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    let id = list[0]["id"].as_i64().unwrap_or_default();
    assert_eq!(location, format!("/api/students/{}", id));

    // Read one
    let resp = reqwest::get(format!("{}{}", base_url, location)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "id": id, "name": "Ada", "email": "ada@example.com", "age": 36 })
    );

    // Partial update
    let resp = client
        .patch(format!("{}{}", base_url, location))
        .json(&json!({ "age": 37 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "id": id, "name": "Ada", "email": "ada@example.com", "age": 37 })
    );

    // Delete, then everything on that id is 404
    let resp = client
        .delete(format!("{}{}", base_url, location))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?, json!({ "success": true }));

    let resp = reqwest::get(format!("{}{}", base_url, location)).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], json!(false));

    let resp = client
        .delete(format!("{}{}", base_url, location))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;
    let client = reqwest::Client::new();
    let payload = json!({ "name": "Ada", "email": "ada@example.com", "age": 36 });

    let first = client
        .post(format!("{}/api/students", base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(first.status(), StatusCode::ACCEPTED);

    let second = client
        .post(format!("{}/api/students", base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let list: Value = reqwest::get(format!("{}/api/students", base_url))
        .await?
        .json()
        .await?;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn update_with_empty_body_and_unknown_id() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;
    let client = reqwest::Client::new();

    let resp = client
        .patch(format!("{}/api/students/1", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>().await?["error"], json!("empty body"));

    let resp = client
        .patch(format!("{}/api/students/1", base_url))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;

    let resp = reqwest::get(format!("{}/api/students/abc", base_url)).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["error"], json!("invalid student id: abc"));
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_in_memory().await?;

    let resp = reqwest::get(format!("{}/health", base_url)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["data"]["status"], json!("ok"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shutdown_returns_after_grace_even_with_a_stuck_request(
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "done"
        }),
    );

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(http::serve(
        listener,
        app,
        async move {
            let _ = stop_rx.await;
        },
        Duration::from_millis(200),
    ));

    // Park a request inside the handler.
    let _in_flight = tokio::spawn(reqwest::get(format!("http://{}/slow", addr)));
    tokio::time::sleep(Duration::from_millis(200)).await;

    let _ = stop_tx.send(());
    let result = tokio::time::timeout(Duration::from_secs(5), server).await?;
    assert!(result?.is_ok());
    Ok(())
}

#[tokio::test]
async fn shutdown_without_traffic_returns_promptly() -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let app = http::create_router(AppState::new(Arc::new(InMemoryStorage::new())));

    let server = tokio::spawn(http::serve(
        listener,
        app,
        async {},
        Duration::from_secs(30),
    ));

    let result = tokio::time::timeout(Duration::from_secs(5), server).await?;
    assert!(result?.is_ok());
    Ok(())
}
