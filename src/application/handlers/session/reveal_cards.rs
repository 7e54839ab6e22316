//! RevealCardsHandler - Command handler for revealing votes.

use crate::application::SessionRegistry;
use crate::domain::foundation::ConnectionId;
use crate::domain::session::SessionError;

use super::{resolve_code, CommandOutcome};

/// Command to reveal all votes of the open round.
#[derive(Debug, Clone)]
pub struct RevealCardsCommand {
    pub connection_id: ConnectionId,
    pub session_code: String,
}

/// Handler for reveals.
pub struct RevealCardsHandler<'a> {
    registry: &'a mut SessionRegistry,
}

impl<'a> RevealCardsHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry) -> Self {
        Self { registry }
    }

    pub fn handle(&mut self, cmd: RevealCardsCommand) -> Result<CommandOutcome, SessionError> {
        let code = resolve_code(&cmd.session_code)?;
        let session = self.registry.lookup_mut(&code)?;

        let events = session.reveal(cmd.connection_id)?;
        Ok(CommandOutcome::new(code, events))
    }
}
