use spin_sdk::http::{Request, Response};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use argon2::password_hash::SaltString;
use ammonia::Builder;
use html_escape::decode_html_entities;
use http::StatusCode;
use rand::rngs::OsRng;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::core::errors::ApiError;

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

/// `Ok(false)` on a wrong password; `Err` when the stored hash itself is
/// unusable.
pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    use argon2::password_hash::{Error as HashError, PasswordHash};

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("stored password hash is unreadable: {}", e))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("password verification failed: {}", e)),
    }
}

pub fn validate_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Strips all markup and returns plain text. ammonia serializes its output
/// as HTML, so entities are decoded again before the text is stored.
pub fn sanitize_text(text: &str) -> String {
    let cleaned = Builder::default()
        .tags(std::collections::HashSet::new())
        .clean(text)
        .to_string();
    decode_html_entities(&cleaned).into_owned()
}

pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(anyhow::Error::from)?;
    Ok(Response::builder()
        .status(status.as_u16())
        .header("Content-Type", "application/json")
        .body(body)
        .build())
}

pub fn no_content() -> Response {
    Response::builder()
        .status(StatusCode::NO_CONTENT.as_u16())
        .body(Vec::new())
        .build()
}

/// Decodes a JSON request body. An empty body decodes as `T::default()`.
pub fn parse_body<T: DeserializeOwned + Default>(req: &Request) -> Result<T, ApiError> {
    let body = req.body();
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("malformed request body: {}", e)))
}

/// Id segment following `prefix`, checked to be a well-formed id.
pub fn path_id<'a>(path: &'a str, prefix: &str) -> Result<&'a str, ApiError> {
    let id = path.trim_start_matches(prefix).trim_end_matches('/');
    if id.is_empty() || !validate_uuid(id) {
        return Err(ApiError::BadRequest("malformatted id".to_string()));
    }
    Ok(id)
}
