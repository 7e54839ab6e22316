//! CreateSessionHandler - Command handler for opening a new session.

use crate::application::SessionRegistry;
use crate::domain::foundation::ConnectionId;
use crate::domain::session::{normalize_player_name, CardValues, SessionError, SessionEvent};

use super::{label_or_default, CommandOutcome, SessionDefaults};

/// Command to create a new session with the caller as facilitator.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub connection_id: ConnectionId,
    pub player_name: String,
    pub session_name: Option<String>,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler<'a> {
    registry: &'a mut SessionRegistry,
    defaults: &'a SessionDefaults,
}

impl<'a> CreateSessionHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry, defaults: &'a SessionDefaults) -> Self {
        Self { registry, defaults }
    }

    pub fn handle(&mut self, cmd: CreateSessionCommand) -> Result<CommandOutcome, SessionError> {
        let player_name = normalize_player_name(&cmd.player_name)?;
        let session_name = label_or_default(cmd.session_name, &self.defaults.session_name);

        let session = self.registry.create(
            session_name,
            cmd.connection_id,
            player_name,
            CardValues::from_preset(self.defaults.deck),
        );

        Ok(CommandOutcome::new(
            session.code().clone(),
            vec![SessionEvent::Created {
                creator: cmd.connection_id,
            }],
        ))
    }
}
