//! SessionEngine - single owner of all session state.
//!
//! Every connection task forwards its commands into one channel. The engine
//! drains that channel and applies commands one at a time, so each command
//! sees the state left by the previous one and no session is ever touched
//! from two places at once. Outcomes go out through a [`SessionNotifier`].

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::foundation::ConnectionId;
use crate::domain::session::{SessionCode, SessionError, SessionEvent};
use crate::ports::SessionNotifier;

use super::handlers::session::{
    CommandOutcome, CreateSessionHandler, EstimateAgainHandler, JoinSessionHandler,
    LeaveSessionCommand, LeaveSessionHandler, RevealCardsHandler, SessionCommand,
    SessionDefaults, StartEstimationHandler, SubmitVoteHandler, UpdateCardValuesHandler,
};
use super::SessionRegistry;

/// Work item sent by connection tasks.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// A decoded client command.
    Execute(SessionCommand),
    /// The connection closed; remove it from its session.
    Disconnect { connection_id: ConnectionId },
}

/// Serialized command processor.
pub struct SessionEngine<N> {
    registry: SessionRegistry,
    defaults: SessionDefaults,
    memberships: HashMap<ConnectionId, SessionCode>,
    notifier: N,
}

impl<N: SessionNotifier> SessionEngine<N> {
    pub fn new(registry: SessionRegistry, defaults: SessionDefaults, notifier: N) -> Self {
        Self {
            registry,
            defaults,
            memberships: HashMap::new(),
            notifier,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Session the connection currently belongs to, if any.
    pub fn session_of(&self, connection_id: ConnectionId) -> Option<&SessionCode> {
        self.memberships.get(&connection_id)
    }

    /// Process commands until every sender is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<EngineCommand>) {
        info!("Session engine started");
        while let Some(command) = commands.recv().await {
            self.handle(command);
        }
        info!(sessions = self.registry.len(), "Session engine stopped");
    }

    /// Apply one command to completion.
    pub fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Execute(command) => self.execute(command),
            EngineCommand::Disconnect { connection_id } => {
                debug!(client = %connection_id, "Connection closed");
                self.leave(connection_id);
            }
        }
    }

    fn execute(&mut self, command: SessionCommand) {
        let caller = command.connection_id();
        let name = command.name();
        let enters_session = command.enters_session();

        match self.dispatch(command) {
            Ok(outcome) => {
                if !enters_session {
                    self.deliver(caller, &outcome);
                    return;
                }

                info!(client = %caller, session = %outcome.code, command = name, "Player entered session");
                let previous = self.memberships.insert(caller, outcome.code.clone());
                self.deliver(caller, &outcome);

                // A connection belongs to at most one session
                if let Some(previous) = previous.filter(|code| *code != outcome.code) {
                    self.leave_session(caller, previous);
                }
            }
            Err(error) => {
                debug!(
                    client = %caller,
                    command = name,
                    code = %error.code(),
                    error = %error,
                    "Command rejected"
                );
                self.notifier.reject(caller, &error);
            }
        }
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<CommandOutcome, SessionError> {
        let registry = &mut self.registry;
        match command {
            SessionCommand::CreateSession(cmd) => {
                CreateSessionHandler::new(registry, &self.defaults).handle(cmd)
            }
            SessionCommand::JoinSession(cmd) => JoinSessionHandler::new(registry).handle(cmd),
            SessionCommand::UpdateCardValues(cmd) => {
                UpdateCardValuesHandler::new(registry).handle(cmd)
            }
            SessionCommand::StartEstimation(cmd) => {
                StartEstimationHandler::new(registry, &self.defaults).handle(cmd)
            }
            SessionCommand::SubmitVote(cmd) => SubmitVoteHandler::new(registry).handle(cmd),
            SessionCommand::RevealCards(cmd) => RevealCardsHandler::new(registry).handle(cmd),
            SessionCommand::EstimateAgain(cmd) => EstimateAgainHandler::new(registry).handle(cmd),
        }
    }

    fn leave(&mut self, connection_id: ConnectionId) {
        if let Some(session_code) = self.memberships.remove(&connection_id) {
            self.leave_session(connection_id, session_code);
        }
    }

    fn leave_session(&mut self, connection_id: ConnectionId, session_code: SessionCode) {
        let result = LeaveSessionHandler::new(&mut self.registry).handle(LeaveSessionCommand {
            connection_id,
            session_code,
        });

        match result {
            Ok(outcome) => {
                info!(client = %connection_id, session = %outcome.code, "Player left session");
                self.deliver(connection_id, &outcome);
            }
            Err(error) => {
                warn!(client = %connection_id, error = %error, "Membership pointed at a missing session");
            }
        }
    }

    fn deliver(&self, caller: ConnectionId, outcome: &CommandOutcome) {
        if outcome.events.is_empty() {
            return;
        }

        for event in &outcome.events {
            if let SessionEvent::SessionDeleted { code } = event {
                info!(session = %code, "Session deleted");
            } else {
                debug!(session = %outcome.code, event = event.event_type(), "Session event");
            }
        }

        let session = self.registry.lookup(&outcome.code).ok();
        self.notifier.publish(session, caller, &outcome.events);
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
