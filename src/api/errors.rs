use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The call needs a session and none was attached
    #[error("You need to log in first")]
    Unauthenticated,
    /// Non-2xx response; `message` comes from the body when the backend sent one
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Could not reach the server: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::FORBIDDEN) | Some(StatusCode::PAYMENT_REQUIRED)
        )
    }

    /// Build a rejection from an error body, falling back to the status text
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error"].iter().find_map(|key| {
                    value
                        .get(*key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.trim().is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| {
                format!(
                    "Request failed ({})",
                    status.canonical_reason().unwrap_or(status.as_str())
                )
            });
        ApiError::Rejected { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_taken_from_body() {
        let err = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"message":"Slug already in use"}"#,
        );
        assert_eq!(err.to_string(), "Slug already in use");
    }

    #[test]
    fn error_field_is_used_when_message_missing() {
        let err = ApiError::from_body(StatusCode::UNAUTHORIZED, r#"{"error":"Invalid token"}"#);
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = ApiError::from_body(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.to_string(), "Request failed (Internal Server Error)");
        assert!(!err.is_not_found());
    }
}
