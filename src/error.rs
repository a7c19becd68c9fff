use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("{service} returned {status}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("OAuth2 token exchange failed: {0}")]
    OAuth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } | AppError::OAuth(_) | AppError::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Upstream { body, .. } = &self {
            tracing::error!(error = %self, upstream_body = %body, "Request failed");
        } else if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        // Upstream bodies stay in the logs; callers only see the summary
        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
