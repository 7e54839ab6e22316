//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, RoundPhase, ValidationError};

/// Reasons a session command is rejected.
///
/// A rejected command never changes session state; the error is reported
/// to the caller only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No session is registered under the given code.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Caller is not the session's facilitator.
    #[error("Only admin can {action}")]
    Forbidden { action: &'static str },

    /// Another player in the session already uses this name.
    #[error("Player name '{0}' is already taken")]
    DuplicateName(String),

    /// The card deck submitted by the facilitator is unusable.
    #[error("Invalid card values: {0}")]
    InvalidConfig(String),

    /// The round is not in a phase that allows this command.
    #[error("Cannot {action} while the round is {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: RoundPhase,
    },

    /// Input failed basic validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SessionError {
    pub fn not_found(code: impl Into<String>) -> Self {
        SessionError::NotFound(code.into())
    }
    pub fn forbidden(action: &'static str) -> Self {
        SessionError::Forbidden { action }
    }
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        SessionError::DuplicateName(name.into())
    }
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        SessionError::InvalidConfig(reason.into())
    }
    pub fn invalid_phase(action: &'static str, phase: RoundPhase) -> Self {
        SessionError::InvalidPhase { action, phase }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Forbidden { .. } => ErrorCode::Forbidden,
            SessionError::DuplicateName(_) => ErrorCode::DuplicateName,
            SessionError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            SessionError::InvalidPhase { .. } => ErrorCode::InvalidPhase,
            SessionError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}
