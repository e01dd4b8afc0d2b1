use http::StatusCode;
use spin_sdk::http::Response;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden")]
    Forbidden,
    /// 404; the message, when present, is sent as `{"error": ...}`.
    #[error("Not Found")]
    NotFound(Option<String>),
    #[error("Internal Error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(msg: &str) -> Self {
        ApiError::NotFound(Some(msg.to_string()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_body(status: StatusCode, msg: &str) -> Response {
    Response::builder()
        .status(status.as_u16())
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"error": msg})).unwrap_or_default())
        .build()
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        match err {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) => error_body(status, &msg),
            ApiError::Forbidden => error_body(status, "Forbidden"),
            ApiError::NotFound(Some(msg)) => error_body(status, &msg),
            ApiError::NotFound(None) => Response::builder().status(status.as_u16()).body(Vec::new()).build(),
            ApiError::Internal(e) => {
                log::error!("request failed: {:#}", e);
                error_body(status, "internal server error")
            }
        }
    }
}
