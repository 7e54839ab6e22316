//! Session domain events.
//!
//! Every successful state change produces one or more events, in the order
//! they happened. The broadcast gateway turns them into wire messages; the
//! events themselves carry only what cannot be read back from the session
//! afterwards (who joined, who left, the average at reveal time).
//!
//! - `Created` - A session was created by its first player
//! - `PlayerJoined` - A player joined an existing session
//! - `CardValuesUpdated` - The facilitator replaced the deck
//! - `RoundStarted` - A new round opened; all votes cleared
//! - `VoteSubmitted` - A vote was cast while votes are hidden
//! - `CardsRevealed` - Votes became visible (or changed after reveal)
//! - `HistoryAppended` - A closed round was archived
//! - `RoundReset` - The round closed; all votes cleared
//! - `AdminChanged` - Facilitator role passed to another player
//! - `PlayerLeft` - A player disconnected
//! - `SessionDeleted` - The last player left; the session is gone

use crate::domain::foundation::ConnectionId;

use super::SessionCode;

/// Outcome of a session state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Created { creator: ConnectionId },
    PlayerJoined { player: ConnectionId },
    CardValuesUpdated,
    RoundStarted,
    VoteSubmitted { voter: ConnectionId },
    CardsRevealed { average: Option<f64> },
    HistoryAppended,
    RoundReset,
    AdminChanged { admin: ConnectionId },
    PlayerLeft { player: ConnectionId },
    SessionDeleted { code: SessionCode },
}

impl SessionEvent {
    /// Returns the dotted event name used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::Created { .. } => "session.created",
            SessionEvent::PlayerJoined { .. } => "player.joined",
            SessionEvent::CardValuesUpdated => "card_values.updated",
            SessionEvent::RoundStarted => "round.started",
            SessionEvent::VoteSubmitted { .. } => "vote.submitted",
            SessionEvent::CardsRevealed { .. } => "cards.revealed",
            SessionEvent::HistoryAppended => "history.appended",
            SessionEvent::RoundReset => "round.reset",
            SessionEvent::AdminChanged { .. } => "admin.changed",
            SessionEvent::PlayerLeft { .. } => "player.left",
            SessionEvent::SessionDeleted { .. } => "session.deleted",
        }
    }
}
