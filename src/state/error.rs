//! Session errors.
//!
//! Argument errors are caller-correctable ("you did something wrong"), state
//! errors are phase violations ("not right now"). Claim rejections are not
//! errors at all; see [`crate::claim::ClaimEvaluation`].

use thiserror::Error;

use super::player::PlayerId;

/// Errors returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Bad input: card not in the pool, phrase source too small, etc.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not permitted in the current session phase.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// No registered player with this id.
    #[error("Unknown player id {0}")]
    PlayerNotFound(PlayerId),
}

impl SessionError {
    pub fn argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    pub fn state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }

    /// Check if this is a caller-correctable argument error.
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a session-phase violation.
    pub fn is_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlayerNotFound(_))
    }
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(SessionError::argument("card taken").is_argument());
        assert!(SessionError::state("locked").is_state());
        assert!(SessionError::PlayerNotFound(PlayerId::new_v4()).is_not_found());
        assert!(!SessionError::state("locked").is_argument());
    }

    #[test]
    fn test_display() {
        let err = SessionError::state("Start the game before drawing");
        assert_eq!(err.to_string(), "Invalid state: Start the game before drawing");
    }
}
