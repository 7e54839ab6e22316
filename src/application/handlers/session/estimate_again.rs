//! EstimateAgainHandler - Command handler for closing a round.

use crate::application::SessionRegistry;
use crate::domain::foundation::ConnectionId;
use crate::domain::session::SessionError;

use super::{resolve_code, CommandOutcome};

/// Command to close the round, archiving it when it has votes.
#[derive(Debug, Clone)]
pub struct EstimateAgainCommand {
    pub connection_id: ConnectionId,
    pub session_code: String,
}

/// Handler for round resets.
pub struct EstimateAgainHandler<'a> {
    registry: &'a mut SessionRegistry,
}

impl<'a> EstimateAgainHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry) -> Self {
        Self { registry }
    }

    pub fn handle(&mut self, cmd: EstimateAgainCommand) -> Result<CommandOutcome, SessionError> {
        let code = resolve_code(&cmd.session_code)?;
        let session = self.registry.lookup_mut(&code)?;

        let events = session.reset_round(cmd.connection_id)?;
        Ok(CommandOutcome::new(code, events))
    }
}
