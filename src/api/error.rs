//! Transport errors surfaced by the remote port.

use thiserror::Error;

/// Errors that can occur while talking to the grading service
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid server address: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {}", .body.as_deref().unwrap_or("no details"))]
    Status { status: u16, body: Option<String> },

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure already rewritten into a user-facing message
    #[error("{0}")]
    Remote(String),
}

impl ApiError {
    /// Build a status error, dropping blank bodies
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let body = if body.trim().is_empty() { None } else { Some(body) };
        ApiError::Status { status, body }
    }

    /// Whether the server answered with 404
    #[cfg(test)]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Message shown when a status error carries no body
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// How an entity store reports failures to its callers.
///
/// The courses endpoints rewrite failures into plain messages; every other
/// collection hands the transport error through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    Passthrough,
    Normalize,
}

impl ErrorPolicy {
    pub fn apply(self, err: ApiError) -> ApiError {
        match self {
            ErrorPolicy::Passthrough => err,
            ErrorPolicy::Normalize => {
                let message = match &err {
                    ApiError::Status { body: Some(body), .. } => body.clone(),
                    ApiError::Status { body: None, .. } => UNKNOWN_ERROR.to_string(),
                    ApiError::Remote(message) => message.clone(),
                    other => format!("API error: {}", other),
                };
                tracing::error!("Request failed: {}", message);
                ApiError::Remote(message)
            }
        }
    }
}
