use spin_sdk::http::{Request, Response};
use http::StatusCode;
use uuid::Uuid;

use crate::AppContext;
use crate::blogs::find_blogs_by_user;
use crate::models::models::{BlogResponse, CreateUserRequest, User, UserResponse, UserWithBlogs};
use crate::core::db::Db;
use crate::core::helpers::{hash_password, json_response, parse_body, sanitize_text};
use crate::core::errors::ApiError;
use crate::config::*;

pub fn find_user_by_id(db: &Db, id: &str) -> anyhow::Result<Option<User>> {
    db.get_json(&user_key(id))
}

pub fn find_user_by_username(db: &Db, username: &str) -> anyhow::Result<Option<User>> {
    for id in db.get_list(USERS_LIST_KEY)? {
        if let Some(u) = find_user_by_id(db, &id)? {
            if u.username == username {
                return Ok(Some(u));
            }
        }
    }
    Ok(None)
}

pub fn find_all_users(db: &Db) -> anyhow::Result<Vec<User>> {
    let mut users = Vec::new();
    for id in db.get_list(USERS_LIST_KEY)? {
        if let Some(u) = find_user_by_id(db, &id)? {
            users.push(u);
        }
    }
    Ok(users)
}

/// Validates and stores a new user. Username presence, length and
/// uniqueness are checked here so every writer goes through them.
pub fn insert_user(
    db: &Db,
    username: Option<&str>,
    name: Option<&str>,
    password_hash: String,
) -> Result<User, ApiError> {
    let username = match username.map(sanitize_text) {
        Some(u) if !u.is_empty() => u,
        _ => {
            return Err(ApiError::BadRequest(
                "User validation failed: username: Path `username` is required.".to_string(),
            ))
        }
    };

    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "User validation failed: username: Path `username` (`{}`) is shorter than the minimum allowed length ({}).",
            username, MIN_USERNAME_LENGTH
        )));
    }

    if find_user_by_username(db, &username)?.is_some() {
        return Err(ApiError::BadRequest(format!(
            "User validation failed: username: Error, expected `username` to be unique. Value: `{}`",
            username
        )));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        username,
        name: name.map(sanitize_text).filter(|n| !n.is_empty()),
        password_hash,
        blogs: Vec::new(),
        version: 0,
    };

    db.set_json(&user_key(&user.id), &user)?;

    let mut users = db.get_list(USERS_LIST_KEY)?;
    users.push(user.id.clone());
    db.set_json(USERS_LIST_KEY, &users)?;

    Ok(user)
}

/// Records `blog_id` in the user's back-reference list.
pub fn append_blog(db: &Db, user: &mut User, blog_id: &str) -> anyhow::Result<()> {
    user.blogs.push(blog_id.to_string());
    user.version += 1;
    db.set_json(&user_key(&user.id), user)
}

pub fn create_user(ctx: &AppContext, req: &Request) -> Result<Response, ApiError> {
    let body: CreateUserRequest = parse_body(req)?;

    let password = body.password.unwrap_or_default();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password is too short (minimum length is {} characters)",
            MIN_PASSWORD_LENGTH
        )));
    }

    let password_hash = hash_password(&password)?;
    let user = insert_user(
        &ctx.db,
        body.username.as_deref(),
        body.name.as_deref(),
        password_hash,
    )?;
    log::info!("created user {} ({})", user.username, user.id);

    json_response(StatusCode::CREATED, &UserResponse::from(&user))
}

pub fn list_users(ctx: &AppContext) -> Result<Response, ApiError> {
    let mut out = Vec::new();
    for user in find_all_users(&ctx.db)? {
        let blogs = find_blogs_by_user(&ctx.db, &user.id)?
            .iter()
            .map(BlogResponse::from)
            .collect();
        out.push(UserWithBlogs {
            username: user.username,
            name: user.name,
            id: user.id,
            blogs,
        });
    }

    json_response(StatusCode::OK, &out)
}
