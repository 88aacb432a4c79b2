use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the request gateway and the typed API functions.
///
/// `Clone` because a single in-flight GET hands its outcome to every caller
/// that joined it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Unauthorized - session expired, please log in again")]
    AuthExpired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Build the error for a non-success status. `message` is the server's
    /// own explanation when it sent one.
    pub fn from_status(status: StatusCode, message: Option<&str>) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::AuthExpired;
        }
        let message = match message.map(str::trim) {
            Some(m) if !m.is_empty() => Self::truncate_body(m),
            _ => Self::status_message(status),
        };
        ApiError::Http {
            status: status.as_u16(),
            message,
        }
    }

    /// "Error {status}: {status text}"
    pub fn status_message(status: StatusCode) -> String {
        format!(
            "Error {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        )
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        ApiError::Network(err.to_string())
    }

    /// HTTP status associated with the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::AuthExpired => Some(401),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::network(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_prefers_server_message() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, Some("Email is required"));
        assert_eq!(
            err,
            ApiError::Http {
                status: 422,
                message: "Email is required".to_string()
            }
        );
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_from_status_synthesizes_message() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, None);
        assert_eq!(err.to_string(), "Error 404: Not Found");

        // Blank messages fall back too
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, Some("  "));
        assert_eq!(err.to_string(), "Error 500: Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_from_status_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, Some("Unauthenticated."));
        assert!(err.is_auth_expired());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_truncate_body() {
        let short = "short body";
        assert_eq!(ApiError::truncate_body(short), short);

        let long = "x".repeat(600);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(500)));
        assert!(truncated.ends_with("(truncated, 600 total bytes)"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // 'é' is two bytes; 499 ASCII bytes puts the cut inside it
        let body = format!("{}é{}", "a".repeat(499), "b".repeat(100));
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.starts_with(&"a".repeat(499)));
        assert!(!truncated.contains('é'));
    }
}
