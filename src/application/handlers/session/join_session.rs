//! JoinSessionHandler - Command handler for joining an existing session.

use crate::application::SessionRegistry;
use crate::domain::foundation::ConnectionId;
use crate::domain::session::{normalize_player_name, SessionError};

use super::{resolve_code, CommandOutcome};

/// Command to join a session by its code.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub connection_id: ConnectionId,
    pub session_code: String,
    pub player_name: String,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler<'a> {
    registry: &'a mut SessionRegistry,
}

impl<'a> JoinSessionHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry) -> Self {
        Self { registry }
    }

    pub fn handle(&mut self, cmd: JoinSessionCommand) -> Result<CommandOutcome, SessionError> {
        let code = resolve_code(&cmd.session_code)?;
        let session = self.registry.lookup_mut(&code)?;
        let player_name = normalize_player_name(&cmd.player_name)?;

        let events = session.join(cmd.connection_id, player_name)?;
        Ok(CommandOutcome::new(code, events))
    }
}
