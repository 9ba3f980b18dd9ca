use thiserror::Error;

/// Every way a console action can fail.
///
/// Each variant is terminal for the action that raised it; nothing in the
/// crate retries.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("No token found, please log in.")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("malformed {resource} response: {reason}")]
    Schema {
        resource: &'static str,
        reason: String,
    },

    #[error("{0}")]
    ValidationMissing(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl From<reqwest::Error> for ConsoleError {
    fn from(e: reqwest::Error) -> Self {
        ConsoleError::RequestFailed(e.to_string())
    }
}

impl From<csv::Error> for ConsoleError {
    fn from(e: csv::Error) -> Self {
        ConsoleError::Export(format!("csv: {e}"))
    }
}

impl From<genpdf::error::Error> for ConsoleError {
    fn from(e: genpdf::error::Error) -> Self {
        ConsoleError::Export(format!("pdf: {e}"))
    }
}

impl ConsoleError {
    /// Static message shown to the operator for a failed action.
    ///
    /// `action` is the fallback text used for transport and server failures,
    /// e.g. `"Failed to load dashboard data."`.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            ConsoleError::RequestFailed(_) | ConsoleError::Schema { .. } => action.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_message() {
        let e = ConsoleError::Unauthenticated;
        assert_eq!(e.user_message("ignored"), "No token found, please log in.");
    }

    #[test]
    fn test_request_failed_uses_static_action_message() {
        let e = ConsoleError::RequestFailed("connection refused".into());
        assert_eq!(
            e.user_message("Failed to load student data."),
            "Failed to load student data."
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let e = ConsoleError::ValidationMissing("name is required".into());
        assert_eq!(e.user_message("Failed to save student."), "name is required");
    }
}
