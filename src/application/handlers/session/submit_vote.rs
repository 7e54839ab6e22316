//! SubmitVoteHandler - Command handler for casting a vote.

use crate::application::SessionRegistry;
use crate::domain::foundation::{ConnectionId, ValidationError};
use crate::domain::session::SessionError;

use super::{resolve_code, CommandOutcome};

/// Command to cast (or change) the caller's vote.
#[derive(Debug, Clone)]
pub struct SubmitVoteCommand {
    pub connection_id: ConnectionId,
    pub session_code: String,
    pub vote: String,
}

/// Handler for votes.
pub struct SubmitVoteHandler<'a> {
    registry: &'a mut SessionRegistry,
}

impl<'a> SubmitVoteHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry) -> Self {
        Self { registry }
    }

    /// Votes are opaque labels; they are not checked against the deck.
    pub fn handle(&mut self, cmd: SubmitVoteCommand) -> Result<CommandOutcome, SessionError> {
        let code = resolve_code(&cmd.session_code)?;
        let session = self.registry.lookup_mut(&code)?;

        let vote = cmd.vote.trim();
        if vote.is_empty() {
            return Err(ValidationError::empty_field("vote").into());
        }

        let events = session.submit_vote(cmd.connection_id, vote)?;
        Ok(CommandOutcome::new(code, events))
    }
}
