use std::collections::HashMap;

use spin_sdk::http::{Request, Response};
use http::StatusCode;
use uuid::Uuid;

use crate::AppContext;
use crate::auth::{extract_token, require_user, verify_token};
use crate::models::models::{Blog, BlogResponse, CreateBlogRequest, UpdateBlogRequest, User};
use crate::core::db::Db;
use crate::core::helpers::{json_response, no_content, parse_body, path_id, sanitize_text};
use crate::core::errors::ApiError;
use crate::users::{append_blog, find_user_by_id};
use crate::config::*;

pub const BLOGS_PATH: &str = "/api/blogs/";

// === Repository ===

pub fn find_all_blogs(db: &Db) -> anyhow::Result<Vec<Blog>> {
    let mut blogs = Vec::new();
    for id in db.get_list(BLOGS_LIST_KEY)? {
        if let Some(b) = find_blog_by_id(db, &id)? {
            blogs.push(b);
        }
    }
    Ok(blogs)
}

pub fn find_blog_by_id(db: &Db, id: &str) -> anyhow::Result<Option<Blog>> {
    db.get_json(&blog_key(id))
}

pub fn find_blogs_by_user(db: &Db, user_id: &str) -> anyhow::Result<Vec<Blog>> {
    Ok(find_all_blogs(db)?
        .into_iter()
        .filter(|b| b.user == user_id)
        .collect())
}

/// Validates and stores a blog owned by `owner`, then records it in the
/// owner's back-reference list.
pub fn insert_blog(db: &Db, owner: &mut User, new_blog: CreateBlogRequest) -> Result<Blog, ApiError> {
    let title = required_field(new_blog.title.as_deref(), "title")?;
    let url = required_field(new_blog.url.as_deref(), "url")?;

    let blog = Blog {
        id: Uuid::new_v4().to_string(),
        title: sanitize_text(title),
        author: new_blog.author.as_deref().map(sanitize_text).unwrap_or_default(),
        url: url.to_string(),
        likes: new_blog.likes.unwrap_or(0),
        user: owner.id.clone(),
        version: 0,
    };

    db.set_json(&blog_key(&blog.id), &blog)?;

    let mut list = db.get_list(BLOGS_LIST_KEY)?;
    list.push(blog.id.clone());
    db.set_json(BLOGS_LIST_KEY, &list)?;

    append_blog(db, owner, &blog.id)?;

    Ok(blog)
}

fn required_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!(
            "Blog validation failed: {field}: Path `{field}` is required."
        ))),
    }
}

/// Removes the blog. Absent ids are a no-op. Owners' back-reference lists
/// are left untouched.
pub fn delete_blog_by_id(db: &Db, id: &str) -> anyhow::Result<bool> {
    if find_blog_by_id(db, id)?.is_none() {
        return Ok(false);
    }

    db.delete(&blog_key(id))?;

    let mut list = db.get_list(BLOGS_LIST_KEY)?;
    list.retain(|b| b != id);
    db.set_json(BLOGS_LIST_KEY, &list)?;

    Ok(true)
}

pub fn update_likes(db: &Db, id: &str, likes: u64) -> anyhow::Result<Option<Blog>> {
    let key = blog_key(id);
    match db.get_json::<Blog>(&key)? {
        Some(mut blog) => {
            blog.likes = likes;
            db.set_json(&key, &blog)?;
            Ok(Some(blog))
        }
        None => Ok(None),
    }
}

// === HTTP Handlers ===

pub fn list_blogs(ctx: &AppContext) -> Result<Response, ApiError> {
    let mut owners: HashMap<String, Option<User>> = HashMap::new();
    let mut out = Vec::new();

    for blog in find_all_blogs(&ctx.db)? {
        if !owners.contains_key(&blog.user) {
            let owner = find_user_by_id(&ctx.db, &blog.user)?;
            owners.insert(blog.user.clone(), owner);
        }
        let owner = owners.get(&blog.user).and_then(|o| o.as_ref());
        out.push(BlogResponse::with_owner(&blog, owner));
    }

    json_response(StatusCode::OK, &out)
}

pub fn get_blog(ctx: &AppContext, path: &str) -> Result<Response, ApiError> {
    let id = path_id(path, BLOGS_PATH)?;

    match find_blog_by_id(&ctx.db, id)? {
        Some(blog) => json_response(StatusCode::OK, &BlogResponse::from(&blog)),
        None => Err(ApiError::NotFound(None)),
    }
}

pub fn create_blog(ctx: &AppContext, req: &Request) -> Result<Response, ApiError> {
    let mut user = require_user(ctx, req)?;
    let body: CreateBlogRequest = parse_body(req)?;

    let blog = insert_blog(&ctx.db, &mut user, body)?;
    log::info!("user {} created blog {}", user.id, blog.id);

    json_response(StatusCode::CREATED, &BlogResponse::from(&blog))
}

pub fn update_blog(ctx: &AppContext, req: &Request) -> Result<Response, ApiError> {
    let id = path_id(req.path(), BLOGS_PATH)?;
    let body: UpdateBlogRequest = parse_body(req)?;

    let updated = match body.likes {
        Some(likes) => update_likes(&ctx.db, id, likes)?,
        None => find_blog_by_id(&ctx.db, id)?,
    };

    match updated {
        Some(blog) => json_response(StatusCode::OK, &BlogResponse::from(&blog)),
        None => Err(ApiError::NotFound(None)),
    }
}

pub fn delete_blog(ctx: &AppContext, req: &Request) -> Result<Response, ApiError> {
    let id = path_id(req.path(), BLOGS_PATH)?;

    if ctx.config.enforce_delete_ownership {
        let user = require_user(ctx, req)?;
        if let Some(blog) = find_blog_by_id(&ctx.db, id)? {
            if blog.user != user.id {
                log::warn!("user {} tried to delete blog {} owned by {}", user.id, id, blog.user);
                return Err(ApiError::Forbidden);
            }
        }
    } else {
        // Any caller may delete; the token is only looked at for the log line.
        let requester = extract_token(req).and_then(|t| verify_token(&ctx.config, &t).ok());
        log::debug!("delete of blog {} requested by {:?}", id, requester);
    }

    if delete_blog_by_id(&ctx.db, id)? {
        log::info!("deleted blog {}", id);
    }

    Ok(no_content())
}
