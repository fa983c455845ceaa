//! Backend call failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of one backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Backend answered with a non-success status; `body` is its text.
    Status { status: u16, body: String },
    /// Request never produced a response (DNS, connect, timeout, I/O).
    Transport(String),
    /// Success response whose body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// Human-readable detail for user-facing error messages.
    pub fn detail(&self) -> String {
        match self {
            Self::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("backend returned status {status}")
                } else {
                    body.to_string()
                }
            }
            Self::Transport(message) | Self::Decode(message) => message.clone(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, body } => write!(f, "backend status {status}: {}", body.trim()),
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<ureq::Error> for ApiError {
    fn from(value: ureq::Error) -> Self {
        Self::Transport(value.to_string())
    }
}
