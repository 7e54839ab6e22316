//! UpdateCardValuesHandler - Command handler for replacing a session's deck.

use crate::application::SessionRegistry;
use crate::domain::foundation::ConnectionId;
use crate::domain::session::{CardPreset, CardValues, SessionError};

use super::{resolve_code, CommandOutcome};

/// The deck a facilitator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSelection {
    /// Labels supplied verbatim by the client.
    Custom(Vec<String>),
    /// One of the built-in decks.
    Preset(CardPreset),
}

impl DeckSelection {
    fn into_card_values(self) -> Result<CardValues, SessionError> {
        match self {
            DeckSelection::Custom(labels) => CardValues::new(labels),
            DeckSelection::Preset(preset) => Ok(CardValues::from_preset(preset)),
        }
    }
}

/// Command to replace the deck of a session.
#[derive(Debug, Clone)]
pub struct UpdateCardValuesCommand {
    pub connection_id: ConnectionId,
    pub session_code: String,
    pub selection: DeckSelection,
}

/// Handler for deck updates.
pub struct UpdateCardValuesHandler<'a> {
    registry: &'a mut SessionRegistry,
}

impl<'a> UpdateCardValuesHandler<'a> {
    pub fn new(registry: &'a mut SessionRegistry) -> Self {
        Self { registry }
    }

    pub fn handle(&mut self, cmd: UpdateCardValuesCommand) -> Result<CommandOutcome, SessionError> {
        let code = resolve_code(&cmd.session_code)?;
        let session = self.registry.lookup_mut(&code)?;
        session.authorize_admin(cmd.connection_id, "update card values")?;

        let card_values = cmd.selection.into_card_values()?;
        let events = session.set_card_values(cmd.connection_id, card_values)?;
        Ok(CommandOutcome::new(code, events))
    }
}
