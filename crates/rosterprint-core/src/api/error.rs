use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store URL is not configured")]
    NotConfigured,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rejected by store: {0}")]
    Rejected(String),
}

/// Coarse category of a [`StoreError`], for callers that branch on the kind
/// and show the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Config,
    Http,
    RateLimited,
    Network,
    Protocol,
    Rejected,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreErrorKind::Config => "config",
            StoreErrorKind::Http => "http",
            StoreErrorKind::RateLimited => "rate-limited",
            StoreErrorKind::Network => "network",
            StoreErrorKind::Protocol => "protocol",
            StoreErrorKind::Rejected => "rejected",
        };
        write!(f, "{}", name)
    }
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl StoreError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 | 403 => StoreError::AccessDenied(truncated),
            404 => StoreError::NotFound(truncated),
            429 => StoreError::RateLimited,
            500..=599 => StoreError::ServerError(truncated),
            _ => StoreError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotConfigured => StoreErrorKind::Config,
            StoreError::AccessDenied(_) | StoreError::NotFound(_) | StoreError::ServerError(_) => {
                StoreErrorKind::Http
            }
            StoreError::RateLimited => StoreErrorKind::RateLimited,
            StoreError::NetworkError(_) => StoreErrorKind::Network,
            StoreError::Encode(_) | StoreError::InvalidResponse(_) => StoreErrorKind::Protocol,
            StoreError::Rejected(_) => StoreErrorKind::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            StoreError::from_status(StatusCode::FORBIDDEN, "nope"),
            StoreError::AccessDenied(ref body) if body == "nope"
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            StoreError::RateLimited
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::BAD_GATEWAY, "down"),
            StoreError::ServerError(_)
        ));
        let teapot = StoreError::from_status(StatusCode::IM_A_TEAPOT, "short and stout");
        assert_eq!(teapot.kind(), StoreErrorKind::Protocol);
        assert!(teapot.to_string().contains("418"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "ก".repeat(400);
        let truncated = StoreError::truncate_body(&body);
        assert!(truncated.contains("truncated, 1200 total bytes"));
    }

    #[test]
    fn test_kind() {
        assert_eq!(StoreError::Rejected("x".into()).kind(), StoreErrorKind::Rejected);
        assert_eq!(StoreError::NotConfigured.kind(), StoreErrorKind::Config);
        assert_eq!(StoreError::RateLimited.kind().to_string(), "rate-limited");
    }
}
