use serde::{Serialize, Deserialize};

// === Stored documents ===
//
// Documents keep the store's own identifier and version fields. They are
// never written to a client directly; see the response types below.

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    /// Ids of blogs created by this user. Not pruned when a blog is deleted.
    #[serde(default)]
    pub blogs: Vec<String>,
    #[serde(rename = "__v", default)]
    pub version: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    /// Owning user id.
    pub user: String,
    #[serde(rename = "__v", default)]
    pub version: u32,
}

// === Request bodies ===

#[derive(Deserialize, Debug, Default)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// Only `likes` is applied; any other field in the body is ignored.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateBlogRequest {
    pub likes: Option<u64>,
}

// === Responses ===

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OwnerSummary {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub id: String,
}

/// Owner field of a blog response: joined summary in listings, bare id
/// everywhere else.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum OwnerRef {
    Summary(OwnerSummary),
    Id(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: OwnerRef,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserResponse {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub id: String,
    pub blogs: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserWithBlogs {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub id: String,
    pub blogs: Vec<BlogResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&Blog> for BlogResponse {
    fn from(blog: &Blog) -> Self {
        BlogResponse {
            id: blog.id.clone(),
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            likes: blog.likes,
            user: OwnerRef::Id(blog.user.clone()),
        }
    }
}

impl BlogResponse {
    /// Response with the owner's summary joined in. Falls back to the bare
    /// id when the owner no longer exists.
    pub fn with_owner(blog: &Blog, owner: Option<&User>) -> Self {
        let mut response = BlogResponse::from(blog);
        if let Some(u) = owner {
            response.user = OwnerRef::Summary(OwnerSummary {
                username: u.username.clone(),
                name: u.name.clone(),
                id: u.id.clone(),
            });
        }
        response
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            username: user.username.clone(),
            name: user.name.clone(),
            id: user.id.clone(),
            blogs: user.blogs.clone(),
        }
    }
}
