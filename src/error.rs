use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error: {message}")]
    Backend {
        message: String,
        code: String,
        status: u16,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a transport-level client failure (connect error, timeout) into
    /// the uniform backend error shape.
    pub fn from_request(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
        let code = if status > 0 {
            format!("HTTP_{status}")
        } else {
            "CLIENT_ERROR".to_string()
        };
        AppError::Backend {
            message: err.to_string(),
            code,
            status,
        }
    }

    /// Wrap a non-2xx backend response.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected backend response")
                .to_string()
        } else {
            body
        };
        AppError::Backend {
            message,
            code: format!("HTTP_{}", status.as_u16()),
            status: status.as_u16(),
        }
    }
}

/// The JSON error body every handler surfaces to the browser. For backend
/// failures `status` carries the upstream status (0 for transport errors),
/// matching the coarse `code`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: String,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (http_status, body) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: msg.clone(),
                    code: "VALIDATION_ERROR".into(),
                    status: StatusCode::BAD_REQUEST.as_u16(),
                },
            ),
            AppError::Backend {
                message,
                code,
                status,
            } => {
                tracing::warn!(code = %code, "backend request failed: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        message: message.clone(),
                        code: code.clone(),
                        status: *status,
                    },
                )
            }
            AppError::Decode(msg) => {
                tracing::error!("payload decode failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        message: msg.clone(),
                        code: "DECODE_ERROR".into(),
                        status: StatusCode::BAD_GATEWAY.as_u16(),
                    },
                )
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: msg.clone(),
                    code: "NOT_FOUND".into(),
                    status: StatusCode::NOT_FOUND.as_u16(),
                },
            ),
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "IO error".into(),
                        code: "IO_ERROR".into(),
                        status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    },
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: msg.clone(),
                        code: "INTERNAL_ERROR".into(),
                        status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    },
                )
            }
        };

        (http_status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
