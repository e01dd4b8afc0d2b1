use spin_sdk::http::{Request, Response};
use http::StatusCode;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::AppContext;
use crate::config::Config;
use crate::models::models::{LoginRequest, LoginResponse, User};
use crate::core::helpers::{json_response, parse_body, sanitize_text, verify_password};
use crate::core::errors::ApiError;
use crate::users::{find_user_by_id, find_user_by_username};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token missing")]
    MissingToken,
    #[error("token invalid")]
    InvalidToken,
    #[error("invalid username or password")]
    InvalidCredentials,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Token payload. Tokens carry no expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub iat: i64,
}

pub fn issue_token(config: &Config, user: &User) -> anyhow::Result<String> {
    let claims = Claims {
        username: user.username.clone(),
        id: Some(user.id.clone()),
        iat: chrono::Utc::now().timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Token error: {}", e))
}

/// Checks the signature and returns the user id the token was issued for.
pub fn verify_token(config: &Config, token: &str) -> Result<String, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        log::debug!("token rejected: {}", e);
        AuthError::InvalidToken
    })?;

    match data.claims.id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(AuthError::InvalidToken),
    }
}

/// Bearer token from the `Authorization` header, if any. A missing or
/// non-bearer header is not an error here; callers decide.
pub fn extract_token(req: &Request) -> Option<String> {
    let auth_header = req.header("Authorization")?.as_str()?;
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Requires a valid bearer token and resolves it to a stored user.
pub fn require_user(ctx: &AppContext, req: &Request) -> Result<User, ApiError> {
    let token = extract_token(req).ok_or(AuthError::MissingToken)?;
    let user_id = verify_token(&ctx.config, &token)?;

    find_user_by_id(&ctx.db, &user_id)?.ok_or_else(|| {
        log::warn!("token references missing user {}", user_id);
        ApiError::not_found("User not found")
    })
}

pub fn login(ctx: &AppContext, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    // usernames are stored sanitized
    let username = sanitize_text(username);
    let user = match find_user_by_username(&ctx.db, &username)? {
        Some(u) => match verify_password(password, &u.password_hash) {
            Ok(true) => u,
            Ok(false) => {
                log::info!("failed login for {:?}", username);
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => {
                log::warn!("cannot verify password of user {}: {:#}", u.id, e);
                return Err(AuthError::InvalidCredentials.into());
            }
        },
        None => {
            log::info!("failed login for {:?}", username);
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = issue_token(&ctx.config, &user)?;
    log::info!("user {} logged in", user.id);

    Ok(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    })
}

pub fn login_user(ctx: &AppContext, req: &Request) -> Result<Response, ApiError> {
    let creds: LoginRequest = parse_body(req)?;
    let resp = login(ctx, &creds.username, &creds.password)?;
    json_response(StatusCode::OK, &resp)
}
