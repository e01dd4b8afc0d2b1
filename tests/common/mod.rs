#![allow(dead_code)]

use bloglist::{route, AppContext};
use bloglist::config::Config;
use bloglist::core::db::Db;
use bloglist::core::helpers::hash_password;
use bloglist::models::models::{Blog, CreateBlogRequest, User};
use bloglist::blogs::{find_all_blogs, insert_blog};
use bloglist::users::{find_all_users, find_user_by_id, insert_user};
use serde_json::Value;
use spin_sdk::http::{Method, Request};

pub const SECRET: &str = "test-secret";

pub fn app() -> AppContext {
    AppContext::new(Db::in_memory(), Config::new(SECRET))
}

pub fn app_with(config: Config) -> AppContext {
    AppContext::new(Db::in_memory(), config)
}

/// Sends a request through the router and returns status plus decoded body
/// (`Value::Null` for an empty body).
pub fn send(ctx: &AppContext, method: Method, path: &str, body: Option<Value>, token: Option<&str>) -> (u16, Value) {
    let auth = token.map(|t| format!("Bearer {}", t));
    send_with_auth(ctx, method, path, body, auth.as_deref())
}

/// Like [`send`], with the `Authorization` header passed through verbatim.
pub fn send_with_auth(
    ctx: &AppContext,
    method: Method,
    path: &str,
    body: Option<Value>,
    authorization: Option<&str>,
) -> (u16, Value) {
    let mut builder = Request::builder();
    builder.method(method).uri(path);
    builder.header("Content-Type", "application/json");
    if let Some(auth) = authorization {
        builder.header("Authorization", auth);
    }
    let bytes = body.map(|b| serde_json::to_vec(&b).unwrap()).unwrap_or_default();
    let req = builder.body(bytes).build();

    let resp = route(ctx, &req);
    let status = *resp.status();
    let json = if resp.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(resp.body()).expect("response body is JSON")
    };
    (status, json)
}

pub fn create_user(ctx: &AppContext, username: &str, password: &str) -> User {
    let hash = hash_password(password).unwrap();
    insert_user(&ctx.db, Some(username), None, hash).unwrap()
}

pub fn login(ctx: &AppContext, username: &str, password: &str) -> String {
    let (status, body) = send(
        ctx,
        Method::Post,
        "/api/login",
        Some(serde_json::json!({"username": username, "password": password})),
        None,
    );
    assert_eq!(status, 200, "login failed: {:?}", body);
    body["token"].as_str().unwrap().to_string()
}

/// Two blogs by two authors with 5 and 8 likes, owned by `owner`.
pub fn seed_blogs(ctx: &AppContext, owner_id: &str) -> Vec<Blog> {
    let initial = [("BlogTitle1", "BlogAuthor1", "BlogURL1", 5), ("BlogTitle2", "BlogAuthor2", "BlogURL2", 8)];

    let mut owner = find_user_by_id(&ctx.db, owner_id).unwrap().unwrap();
    initial
        .iter()
        .map(|(title, author, url, likes)| {
            insert_blog(
                &ctx.db,
                &mut owner,
                CreateBlogRequest {
                    title: Some(title.to_string()),
                    author: Some(author.to_string()),
                    url: Some(url.to_string()),
                    likes: Some(*likes),
                },
            )
            .unwrap()
        })
        .collect()
}

pub fn blogs_in_db(ctx: &AppContext) -> Vec<Blog> {
    find_all_blogs(&ctx.db).unwrap()
}

pub fn users_in_db(ctx: &AppContext) -> Vec<User> {
    find_all_users(&ctx.db).unwrap()
}
