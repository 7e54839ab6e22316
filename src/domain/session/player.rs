//! Session participants.

use crate::domain::foundation::{ConnectionId, ValidationError};

/// A participant connected to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: ConnectionId,
    name: String,
    vote: Option<String>,
}

impl Player {
    /// Creates a player with no vote cast.
    pub fn new(id: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            vote: None,
        }
    }

    /// Returns the connection handle that identifies this player.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the vote cast in the current round, if any.
    pub fn vote(&self) -> Option<&str> {
        self.vote.as_deref()
    }

    /// Returns true if a vote is cast in the current round.
    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }

    pub(crate) fn cast_vote(&mut self, vote: String) {
        self.vote = Some(vote);
    }

    pub(crate) fn clear_vote(&mut self) {
        self.vote = None;
    }
}

/// Trims a requested display name, rejecting blank input.
pub fn normalize_player_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::empty_field("playerName"));
    }
    Ok(name.to_string())
}
