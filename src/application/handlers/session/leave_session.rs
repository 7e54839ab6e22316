//! LeaveSessionHandler - Removes a departing connection from its session.

use crate::application::SessionRegistry;
use crate::domain::foundation::ConnectionId;
use crate::domain::session::{SessionCode, SessionError, SessionEvent};

use super::CommandOutcome;

/// Command to remove a connection from the session it belongs to.
#[derive(Debug, Clone)]
pub struct LeaveSessionCommand {
    pub connection_id: ConnectionId,
    pub session_code: SessionCode,
}

/// Handler for departures.
pub struct LeaveSessionHandler<'a> {
    registry: &'a mut SessionRegistry,
}

impl<'a> LeaveSessionHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry) -> Self {
        Self { registry }
    }

    /// Removes the player and deletes the session if nobody is left.
    ///
    /// An emptied session yields only `SessionDeleted`; there is nobody to
    /// tell about the departure.
    pub fn handle(&mut self, cmd: LeaveSessionCommand) -> Result<CommandOutcome, SessionError> {
        let code = cmd.session_code;
        let session = self.registry.lookup_mut(&code)?;

        let mut events = session.remove_player(cmd.connection_id);
        if self.registry.remove_if_empty(&code) {
            events = vec![SessionEvent::SessionDeleted { code: code.clone() }];
        }
        Ok(CommandOutcome::new(code, events))
    }
}
