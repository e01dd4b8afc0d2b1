use spin_sdk::http::Response;
use http::StatusCode;
use serde::Serialize;

use crate::AppContext;
use crate::blogs::find_all_blogs;
use crate::list_helper::{favorite_blog, most_blogs, most_likes, total_likes, AuthorBlogs, AuthorLikes};
use crate::models::models::BlogResponse;
use crate::core::helpers::json_response;
use crate::core::errors::ApiError;

#[derive(Serialize)]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_blog: Option<BlogResponse>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

pub fn get_stats(ctx: &AppContext) -> Result<Response, ApiError> {
    let blogs = find_all_blogs(&ctx.db)?;

    let stats = BlogStats {
        total_likes: total_likes(&blogs),
        favorite_blog: favorite_blog(&blogs).map(BlogResponse::from),
        most_blogs: most_blogs(&blogs),
        most_likes: most_likes(&blogs),
    };

    json_response(StatusCode::OK, &stats)
}
