use serde::{Deserialize, Serialize};

/// Profile handed to the provider when creating a sign-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PendingSignup {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Complete,
    MissingRequirements,
    Abandoned,
    Other(String),
}

impl From<&str> for VerificationStatus {
    fn from(value: &str) -> Self {
        match value {
            "complete" => VerificationStatus::Complete,
            "missing_requirements" => VerificationStatus::MissingRequirements,
            "abandoned" => VerificationStatus::Abandoned,
            other => VerificationStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Complete => f.write_str("complete"),
            VerificationStatus::MissingRequirements => f.write_str("missing_requirements"),
            VerificationStatus::Abandoned => f.write_str("abandoned"),
            VerificationStatus::Other(s) => f.write_str(s),
        }
    }
}

/// Result of submitting a one-time code
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationAttempt {
    pub status: VerificationStatus,
    pub created_session_id: Option<String>,
}

impl VerificationAttempt {
    pub fn is_complete(&self) -> bool {
        self.status == VerificationStatus::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_keeps_unknown_values() {
        assert_eq!(VerificationStatus::from("complete"), VerificationStatus::Complete);
        assert_eq!(
            VerificationStatus::from("needs_second_factor"),
            VerificationStatus::Other("needs_second_factor".to_string())
        );
        assert_eq!(VerificationStatus::MissingRequirements.to_string(), "missing_requirements");
    }
}
