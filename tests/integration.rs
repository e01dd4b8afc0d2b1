//! Flows against a running server (`BLOGLIST_ENV=test cargo run`).
//! Ignored by default; run with `cargo test -- --ignored`.

use serde_json::json;
use std::sync::Mutex;

const BASE_URL: &str = "http://127.0.0.1:3003";
static TEST_LOCK: Mutex<()> = Mutex::new(());

fn lock_test() -> std::sync::MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

async fn register_and_login(client: &reqwest::Client, prefix: &str) -> (String, String) {
    let username = format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8]);

    let user_resp = client
        .post(format!("{}/api/users", BASE_URL))
        .json(&json!({"username": username, "name": "Flow Tester", "password": "test"}))
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(user_resp.status(), 201);
    let user = user_resp.json::<serde_json::Value>().await.unwrap();
    let user_id = user["id"].as_str().unwrap().to_string();

    let login_resp = client
        .post(format!("{}/api/login", BASE_URL))
        .json(&json!({"username": username, "password": "test"}))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(login_resp.status(), 200);
    let token_data = login_resp.json::<serde_json::Value>().await.unwrap();
    let token = token_data["token"].as_str().unwrap().to_string();

    (user_id, token)
}

#[ignore]
#[tokio::test]
async fn test_full_blog_flow() {
    let _lock = lock_test();
    let client = reqwest::Client::new();
    let (user_id, token) = register_and_login(&client, "flow").await;

    // create
    let blog_resp = client
        .post(format!("{}/api/blogs", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"title": "Integration", "author": "Tester", "url": "http://example.com"}))
        .send()
        .await
        .expect("Failed to create blog");
    assert_eq!(blog_resp.status(), 201);
    assert_eq!(
        blog_resp.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let blog = blog_resp.json::<serde_json::Value>().await.unwrap();
    assert_eq!(blog["likes"], 0);
    assert_eq!(blog["user"], user_id.as_str());
    let blog_id = blog["id"].as_str().unwrap().to_string();

    // like
    let put_resp = client
        .put(format!("{}/api/blogs/{}", BASE_URL, blog_id))
        .json(&json!({"likes": 1}))
        .send()
        .await
        .expect("Failed to update blog");
    assert_eq!(put_resp.status(), 200);

    let get_resp = client
        .get(format!("{}/api/blogs/{}", BASE_URL, blog_id))
        .send()
        .await
        .expect("Failed to fetch blog");
    let fetched = get_resp.json::<serde_json::Value>().await.unwrap();
    assert_eq!(fetched["likes"], 1);

    // delete
    let del_resp = client
        .delete(format!("{}/api/blogs/{}", BASE_URL, blog_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete blog");
    assert_eq!(del_resp.status(), 204);

    let gone = client
        .get(format!("{}/api/blogs/{}", BASE_URL, blog_id))
        .send()
        .await
        .expect("Failed to fetch blog");
    assert_eq!(gone.status(), 404);
}

#[ignore]
#[tokio::test]
async fn test_create_blog_requires_auth() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/blogs", BASE_URL))
        .json(&json!({"title": "no auth", "url": "http://example.com"}))
        .send()
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), 401);
}

#[ignore]
#[tokio::test]
async fn test_login_invalid_credentials() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/login", BASE_URL))
        .json(&json!({"username": "nonexistent_user", "password": "wrongpass"}))
        .send()
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), 401);
}

#[ignore]
#[tokio::test]
async fn test_reset_clears_everything() {
    let _lock = lock_test();
    let client = reqwest::Client::new();
    register_and_login(&client, "reset").await;

    let reset = client
        .post(format!("{}/api/testing/reset", BASE_URL))
        .send()
        .await
        .expect("Failed to reset");
    assert_eq!(reset.status(), 204);

    let users = client
        .get(format!("{}/api/users", BASE_URL))
        .send()
        .await
        .expect("Failed to list users")
        .json::<Vec<serde_json::Value>>()
        .await
        .unwrap();
    assert!(users.is_empty());
}
