use std::fmt;

use serde_json::Value;

/// Categories of backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection refused, DNS failure, reset mid-body
    Network,
    /// Request exceeded the configured timeout
    Timeout,
    /// Non-success HTTP status (other than 401/403)
    HttpStatus,
    /// 401/403, or a backend message saying the student is not authorized
    Unauthorized,
    /// Response body could not be decoded
    Parse,
    /// The request could not be built (bad URL segment, etc.)
    Request,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::Parse => write!(f, "parse"),
            ApiErrorKind::Request => write!(f, "request"),
        }
    }
}

/// Structured error from the backend client.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

/// Marker the backend puts in eligibility rejections.
const NOT_AUTHORIZED_MARKER: &str = "Not Authorized";

/// Error bodies are truncated to this many bytes in `details`.
const MAX_DETAILS_LEN: usize = 2048;

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(truncate(details.into()));
        self
    }

    /// Creates an error from a non-success HTTP status and its body.
    ///
    /// A `{"message": ...}` body is lifted into the summary. 401/403 or a
    /// message containing "Not Authorized" become `Unauthorized`.
    pub fn http_status(status: u16, body: &str) -> Self {
        let backend_message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            json.get("message")
                .or_else(|| json.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });

        let message = match &backend_message {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };

        let unauthorized = matches!(status, 401 | 403)
            || backend_message
                .as_deref()
                .unwrap_or(body)
                .contains(NOT_AUTHORIZED_MARKER);
        let kind = if unauthorized {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::HttpStatus
        };

        let err = Self::new(kind, message);
        if body.is_empty() {
            err
        } else {
            err.with_details(body)
        }
    }

    pub fn parse(what: &str, err: &serde_json::Error, body: &str) -> Self {
        Self::new(ApiErrorKind::Parse, format!("Failed to parse {what}: {err}")).with_details(body)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for backend operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Classifies a reqwest error into an `ApiError`.
pub fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::new(ApiErrorKind::Timeout, format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ApiError::new(ApiErrorKind::Network, format!("Connection failed: {e}"))
    } else if e.is_decode() {
        ApiError::new(ApiErrorKind::Parse, format!("Failed to decode response: {e}"))
    } else if e.is_builder() {
        ApiError::new(ApiErrorKind::Request, format!("Request error: {e}"))
    } else {
        ApiError::new(ApiErrorKind::Network, format!("Network error: {e}"))
    }
}

fn truncate(mut s: String) -> String {
    if s.len() > MAX_DETAILS_LEN {
        let mut end = MAX_DETAILS_LEN;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
        s.push('…');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_lifts_backend_message() {
        let err = ApiError::http_status(500, r#"{"message":"database down"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 500: database down");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_forbidden_is_unauthorized() {
        let err = ApiError::http_status(403, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.message, "HTTP 403");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_not_authorized_message_is_unauthorized_regardless_of_status() {
        let err = ApiError::http_status(400, r#"{"message":"Not Authorized to apply"}"#);
        assert!(err.is_unauthorized());

        let err = ApiError::http_status(500, "Not Authorized");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_details_are_truncated() {
        let body = "x".repeat(MAX_DETAILS_LEN * 2);
        let err = ApiError::http_status(502, &body);
        let details = err.details.unwrap();
        assert!(details.len() <= MAX_DETAILS_LEN + '…'.len_utf8());
        assert!(details.ends_with('…'));
    }
}
