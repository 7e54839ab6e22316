//! Session command handlers.
//!
//! One handler per client command. Handlers borrow the registry for the
//! duration of a single command, apply it to the target session and return
//! the events it produced. Delivery of those events is the engine's job.

mod create_session;
mod estimate_again;
mod join_session;
mod leave_session;
mod reveal_cards;
mod start_estimation;
mod submit_vote;
mod update_card_values;

pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use estimate_again::{EstimateAgainCommand, EstimateAgainHandler};
pub use join_session::{JoinSessionCommand, JoinSessionHandler};
pub use leave_session::{LeaveSessionCommand, LeaveSessionHandler};
pub use reveal_cards::{RevealCardsCommand, RevealCardsHandler};
pub use start_estimation::{StartEstimationCommand, StartEstimationHandler};
pub use submit_vote::{SubmitVoteCommand, SubmitVoteHandler};
pub use update_card_values::{DeckSelection, UpdateCardValuesCommand, UpdateCardValuesHandler};

use crate::domain::foundation::ConnectionId;
use crate::domain::session::{CardPreset, SessionCode, SessionError, SessionEvent};

/// Result of a successfully applied session command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    /// Session the command was applied to.
    pub code: SessionCode,
    /// Events in the order they happened. May be empty.
    pub events: Vec<SessionEvent>,
}

impl CommandOutcome {
    pub fn new(code: SessionCode, events: Vec<SessionEvent>) -> Self {
        Self { code, events }
    }
}

/// Fallback labels and deck used when a client omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub session_name: String,
    pub story_name: String,
    pub deck: CardPreset,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            session_name: "Planning Session".to_string(),
            story_name: "Untitled Story".to_string(),
            deck: CardPreset::Fibonacci,
        }
    }
}

/// Any command a connected client can issue.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    CreateSession(CreateSessionCommand),
    JoinSession(JoinSessionCommand),
    UpdateCardValues(UpdateCardValuesCommand),
    StartEstimation(StartEstimationCommand),
    SubmitVote(SubmitVoteCommand),
    RevealCards(RevealCardsCommand),
    EstimateAgain(EstimateAgainCommand),
}

impl SessionCommand {
    /// Connection that issued the command.
    pub fn connection_id(&self) -> ConnectionId {
        match self {
            SessionCommand::CreateSession(cmd) => cmd.connection_id,
            SessionCommand::JoinSession(cmd) => cmd.connection_id,
            SessionCommand::UpdateCardValues(cmd) => cmd.connection_id,
            SessionCommand::StartEstimation(cmd) => cmd.connection_id,
            SessionCommand::SubmitVote(cmd) => cmd.connection_id,
            SessionCommand::RevealCards(cmd) => cmd.connection_id,
            SessionCommand::EstimateAgain(cmd) => cmd.connection_id,
        }
    }

    /// Returns the command name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::CreateSession(_) => "createSession",
            SessionCommand::JoinSession(_) => "joinSession",
            SessionCommand::UpdateCardValues(_) => "updateCardValues",
            SessionCommand::StartEstimation(_) => "startEstimation",
            SessionCommand::SubmitVote(_) => "submitVote",
            SessionCommand::RevealCards(_) => "revealCards",
            SessionCommand::EstimateAgain(_) => "estimateAgain",
        }
    }

    /// True for commands that place the caller in a (new) session.
    pub fn enters_session(&self) -> bool {
        matches!(
            self,
            SessionCommand::CreateSession(_) | SessionCommand::JoinSession(_)
        )
    }
}

/// Parses a client-supplied code. Malformed codes cannot name a live
/// session, so they are reported as not found.
pub(crate) fn resolve_code(raw: &str) -> Result<SessionCode, SessionError> {
    SessionCode::parse(raw).map_err(|_| SessionError::not_found(raw.trim()))
}

/// Trims an optional label, falling back to `default` when absent or blank.
pub(crate) fn label_or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::application::SessionRegistry;
    use crate::domain::foundation::ConnectionId;
    use crate::domain::session::{CardValues, SessionCode};

    /// Registry holding one session created by a fresh connection.
    pub fn registry_with_session() -> (SessionRegistry, SessionCode, ConnectionId) {
        let mut registry = SessionRegistry::with_seed(7);
        let admin = ConnectionId::new();
        let code = registry
            .create("Sprint 1", admin, "Alice", CardValues::default())
            .code()
            .clone();
        (registry, code, admin)
    }

    /// Adds a player to an existing session.
    pub fn add_player(registry: &mut SessionRegistry, code: &SessionCode, name: &str) -> ConnectionId {
        let id = ConnectionId::new();
        registry.lookup_mut(code).unwrap().join(id, name).unwrap();
        id
    }
}
