//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `DomainError`. Rule failures are `RegistrationError`.

use thiserror::Error;

/// Fatal outcome of a registration attempt. None of these are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Can't register speaker with no sessions to present")]
    NoSessions,

    #[error("Speaker doesn't meet our arbitrary and capricious standards")]
    NotEligible,

    #[error("No sessions approved")]
    NoApprovedSessions,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repo(String),

    #[error("Config error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = RegistrationError::MissingField { field: "Email" };
        assert_eq!(err.to_string(), "Email is required");
    }
}
