//! Error types for the remixr session core.

use thiserror::Error;

use crate::models::SeedKind;
use crate::session::SessionState;

/// Transport and decoding errors raised by the backend and catalog clients.
#[derive(Debug, Error)]
pub enum RemixrError {
    /// HTTP request failed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The remote service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A required field was absent from a response.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// The response was well-formed JSON but not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An id that cannot be used as a single URL path segment.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Configuration could not be used to build a client.
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, RemixrError>;

/// Seed-set cardinality and identity violations.
///
/// These never change state; the session reports them as notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("Cannot add more than {max} seeds")]
    Full { max: usize },

    #[error("Cannot remove all seeds")]
    LastSeed,

    #[error("{kind} {id} is already a seed")]
    Duplicate { kind: SeedKind, id: String },

    #[error("{kind} {id} is not a seed")]
    NotFound { kind: SeedKind, id: String },

    /// A seed set was constructed with a total outside `1..=5`.
    #[error("A seed set needs between 1 and 5 seeds, got {count}")]
    OutOfBounds { count: usize },
}

/// Errors surfaced by [`SessionController`](crate::SessionController).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Constraint(#[from] SeedError),

    /// Loading the stored playlist or resolving its seeds failed.
    #[error("Initial load failed: {0}")]
    InitialLoad(#[source] RemixrError),

    #[error("Save failed: {0}")]
    Save(#[source] RemixrError),

    /// The session has no songs yet; nothing is sent to the backend.
    #[error("No songs to save")]
    NothingToSave,

    /// The session reached its terminal state and must be restarted.
    #[error("Session failed to load; start a new session")]
    Failed,

    #[error("Session is busy ({0:?})")]
    Busy(SessionState),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_messages() {
        assert_eq!(
            SeedError::Full { max: 5 }.to_string(),
            "Cannot add more than 5 seeds"
        );
        assert_eq!(SeedError::LastSeed.to_string(), "Cannot remove all seeds");
    }

    #[test]
    fn test_session_error_wraps_constraint() {
        let err: SessionError = SeedError::LastSeed.into();
        assert!(matches!(err, SessionError::Constraint(SeedError::LastSeed)));
        assert_eq!(err.to_string(), "Cannot remove all seeds");
    }
}
