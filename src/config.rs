use anyhow::Context;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 3;
pub const DEFAULT_PORT: u16 = 3003;

pub const USERS_LIST_KEY: &str = "users_list";
pub const BLOGS_LIST_KEY: &str = "blogs_list";

pub fn user_key(id: &str) -> String {
    format!("user:{}", id)
}

pub fn blog_key(id: &str) -> String {
    format!("blog:{}", id)
}

/// Runtime settings, read once at startup and handed to every handler
/// through [`crate::AppContext`].
#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret used to sign and verify bearer tokens.
    pub secret: String,
    pub port: u16,
    /// When set, only the owner of a blog may delete it.
    pub enforce_delete_ownership: bool,
    /// Exposes `/api/testing/*`.
    pub testing: bool,
}

impl Config {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            port: DEFAULT_PORT,
            enforce_delete_ownership: false,
            testing: false,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("BLOGLIST_SECRET")
            .context("BLOGLIST_SECRET must be set")?;
        if secret.is_empty() {
            anyhow::bail!("BLOGLIST_SECRET must not be empty");
        }

        let port = match std::env::var("BLOGLIST_PORT") {
            Ok(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid BLOGLIST_PORT: {}", v))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            secret,
            port,
            enforce_delete_ownership: env_flag("BLOGLIST_ENFORCE_DELETE_OWNERSHIP"),
            testing: std::env::var("BLOGLIST_ENV").map(|v| v == "test").unwrap_or(false),
        })
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
