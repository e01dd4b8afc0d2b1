use spin_sdk::http::{Method, Request, Response};

pub mod auth;
pub mod blogs;
pub mod config;
pub mod core;
pub mod list_helper;
pub mod models;
pub mod stats;
pub mod testing;
pub mod users;

use crate::config::Config;
use crate::core::db::Db;
use crate::core::errors::ApiError;

/// Everything a handler needs: the document store and the runtime config.
#[derive(Clone)]
pub struct AppContext {
    pub db: Db,
    pub config: Config,
}

impl AppContext {
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }
}

/// Dispatches a request to its handler. Errors are turned into responses
/// here; unexpected ones are logged and answered with a 500.
pub fn route(ctx: &AppContext, req: &Request) -> Response {
    let path = req.path().trim_end_matches('/');

    let result = match (req.method(), path) {
        (Method::Get, "/api/blogs") => blogs::list_blogs(ctx),
        (Method::Post, "/api/blogs") => blogs::create_blog(ctx, req),
        (Method::Get, p) if p.starts_with(blogs::BLOGS_PATH) => blogs::get_blog(ctx, p),
        (Method::Put, p) if p.starts_with(blogs::BLOGS_PATH) => blogs::update_blog(ctx, req),
        (Method::Delete, p) if p.starts_with(blogs::BLOGS_PATH) => blogs::delete_blog(ctx, req),
        (Method::Get, "/api/users") => users::list_users(ctx),
        (Method::Post, "/api/users") => users::create_user(ctx, req),
        (Method::Post, "/api/login") => auth::login_user(ctx, req),
        (Method::Get, "/api/stats") => stats::get_stats(ctx),
        (Method::Post, "/api/testing/reset") if ctx.config.testing => testing::reset(ctx),
        _ => Err(ApiError::not_found("unknown endpoint")),
    };

    result.unwrap_or_else(Response::from)
}

// === Component entrypoint ===
#[cfg(target_arch = "wasm32")]
#[spin_sdk::http_component]
fn handle(req: Request) -> anyhow::Result<Response> {
    let config = Config::from_env()?;
    let store = spin_sdk::key_value::Store::open_default()
        .map_err(|e| anyhow::anyhow!("failed to open key-value store: {:?}", e))?;
    let ctx = AppContext::new(Db::new(store), config);

    Ok(route(&ctx, &req))
}
