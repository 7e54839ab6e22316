//! StartEstimationHandler - Command handler for opening a round.

use crate::application::SessionRegistry;
use crate::domain::foundation::ConnectionId;
use crate::domain::session::SessionError;

use super::{label_or_default, resolve_code, CommandOutcome, SessionDefaults};

/// Command to open a round on a story.
#[derive(Debug, Clone)]
pub struct StartEstimationCommand {
    pub connection_id: ConnectionId,
    pub session_code: String,
    pub story_name: Option<String>,
}

/// Handler for starting rounds.
pub struct StartEstimationHandler<'a> {
    registry: &'a mut SessionRegistry,
    defaults: &'a SessionDefaults,
}

impl<'a> StartEstimationHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry, defaults: &'a SessionDefaults) -> Self {
        Self { registry, defaults }
    }

    pub fn handle(&mut self, cmd: StartEstimationCommand) -> Result<CommandOutcome, SessionError> {
        let code = resolve_code(&cmd.session_code)?;
        let session = self.registry.lookup_mut(&code)?;
        let story = label_or_default(cmd.story_name, &self.defaults.story_name);

        let events = session.start_round(cmd.connection_id, story)?;
        Ok(CommandOutcome::new(code, events))
    }
}
