#![cfg(feature = "server")]

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use candidate_registry::api::{create_router, AppState};
use candidate_registry::CandidateService;

async fn spawn_app() -> String {
    let service = CandidateService::new(":memory:").await.expect("Failed to open store");
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn create(base_url: &str, name: &str, email: &str) -> Value {
    let resp = Client::new()
        .post(format!("{}/candidates", base_url))
        .json(&json!({
            "name": name,
            "age": 30,
            "gender": "F",
            "email": email,
            "phone_number": "0123456789"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_health() {
    let base_url = spawn_app().await;
    let body: Value = reqwest::get(format!("{}/health", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["candidates"], 0);
    assert_eq!(body["ranker"], "tiered");
}

#[tokio::test]
async fn test_create_envelope() {
    let base_url = spawn_app().await;
    let body = create(&base_url, "Ann Lee", "Ann@Example.com").await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Candidate created successfully");
    assert_eq!(body["data"]["email"], "ann@example.com");
    assert_eq!(body["data"]["gender"], "F");
    assert!(body["data"]["id"].as_i64().is_some());
}

#[tokio::test]
async fn test_create_validation_error() {
    let base_url = spawn_app().await;
    let resp = Client::new()
        .post(format!("{}/candidates", base_url))
        .json(&json!({ "name": "Ann Lee", "age": 10 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["age"], json!(["Age must be at least 18"]));
    assert_eq!(body["email"], json!(["Email is required"]));
    assert_eq!(body["gender"], json!(["Gender is required"]));
    assert!(body.get("name").is_none());
}

#[tokio::test]
async fn test_wrong_json_types_are_field_errors() {
    let base_url = spawn_app().await;
    let resp = Client::new()
        .post(format!("{}/candidates", base_url))
        .json(&json!({
            "name": true,
            "age": true,
            "gender": "F",
            "email": "ann@example.com",
            "phone_number": "0123456789"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["age"], json!(["Age must be a valid integer"]));
    assert_eq!(body["name"], json!(["Not a valid string."]));
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn test_malformed_body_is_json_400() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let resp = client
        .post(format!("{}/candidates", base_url))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().is_some());

    // top-level value of the wrong shape
    let resp = client
        .post(format!("{}/candidates", base_url))
        .json(&json!("Ann Lee"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let resp = client
        .get(format!("{}/candidates/abc", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().is_some());

    let resp = client
        .patch(format!("{}/candidates/abc", base_url))
        .json(&json!({ "age": 40 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_email() {
    let base_url = spawn_app().await;
    create(&base_url, "Ann Lee", "ann@example.com").await;

    let resp = Client::new()
        .post(format!("{}/candidates", base_url))
        .json(&json!({
            "name": "Ann Clone",
            "age": 30,
            "gender": "F",
            "email": "ann@example.com",
            "phone_number": "0123456789"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["email"], json!(["Email already exists"]));
}

#[tokio::test]
async fn test_update_get_delete() {
    let base_url = spawn_app().await;
    let created = create(&base_url, "Ann Lee", "ann@example.com").await;
    let id = created["data"]["id"].as_i64().unwrap();
    let client = Client::new();

    let resp = client
        .patch(format!("{}/candidates/{}", base_url, id))
        .json(&json!({ "age": "41" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Candidate updated successfully");
    assert_eq!(body["data"]["age"], 41);

    let resp = client
        .put(format!("{}/candidates/{}", base_url, id))
        .json(&json!({ "name": "Ann Marie Lee" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = client
        .get(format!("{}/candidates/{}", base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["name"], "Ann Marie Lee");
    assert_eq!(fetched["age"], 41);

    let resp = client
        .delete(format!("{}/candidates/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/candidates/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_ranking() {
    let base_url = spawn_app().await;
    create(&base_url, "Zed Young", "zed@example.com").await;
    create(&base_url, "Amy Young", "amy@example.com").await;
    create(&base_url, "Bob Stone", "bob@example.com").await;

    let body: Value = Client::new()
        .get(format!("{}/candidates/search", base_url))
        .query(&[("query", "young")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Amy Young", "Zed Young"]);
}

#[tokio::test]
async fn test_search_requires_query() {
    let base_url = spawn_app().await;
    let client = Client::new();

    for url in [
        format!("{}/candidates/search", base_url),
        format!("{}/candidates/search?query=", base_url),
        format!("{}/candidates/search?query=%20%20", base_url),
    ] {
        let resp = client.get(url).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "Search query is required");
    }
}

#[tokio::test]
async fn test_search_no_match() {
    let base_url = spawn_app().await;
    create(&base_url, "Ann Lee", "ann@example.com").await;

    let resp = Client::new()
        .get(format!("{}/candidates/search?query=zelda", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}
