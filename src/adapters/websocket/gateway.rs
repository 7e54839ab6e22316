//! Broadcast gateway connecting session events to WebSocket clients.
//!
//! Implements the [`SessionNotifier`] port: each event is transformed into
//! a server message, routed to its audience and queued on the members'
//! outboxes.
//!
//! # Event Flow
//!
//! ```text
//! SessionEngine
//!      │ publish(session, caller, events)
//!      ▼
//! BroadcastGateway ── transform ──▶ (Audience, ServerMessage)
//!      │
//!      ▼
//! RoomManager ── try_send ──▶ per-connection outbox
//! ```

use std::sync::Arc;

use crate::domain::foundation::ConnectionId;
use crate::domain::session::{Session, SessionError, SessionEvent};
use crate::ports::SessionNotifier;

use super::messages::{
    CardValuesMessage, CardsRevealedMessage, ErrorMessage, EstimationStartedMessage,
    HistoryMessage, NewAdminMessage, PlayerView, RosterMessage, ServerMessage, SessionSnapshot,
};
use super::rooms::RoomManager;

/// Who receives a transformed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// A single connection.
    Client(ConnectionId),
    /// Everyone on the session roster.
    Room,
    /// Everyone on the roster but one.
    RoomExcept(ConnectionId),
}

/// Bridge between the session engine and WebSocket connections.
pub struct BroadcastGateway {
    room_manager: Arc<RoomManager>,
}

impl BroadcastGateway {
    /// Create a new gateway with the given room manager.
    pub fn new(room_manager: Arc<RoomManager>) -> Self {
        Self { room_manager }
    }

    /// Transform a session event into the messages it produces.
    ///
    /// `session` is the state after the command that raised the event.
    pub fn transform(session: &Session, event: &SessionEvent) -> Vec<(Audience, ServerMessage)> {
        let roster = || PlayerView::roster(session);

        match event {
            SessionEvent::Created { creator } => vec![(
                Audience::Client(*creator),
                ServerMessage::SessionCreated(SessionSnapshot::new(session, *creator)),
            )],
            SessionEvent::PlayerJoined { player } => vec![
                (
                    Audience::Client(*player),
                    ServerMessage::SessionJoined(SessionSnapshot::new(session, *player)),
                ),
                (
                    Audience::RoomExcept(*player),
                    ServerMessage::PlayerJoined(RosterMessage { players: roster() }),
                ),
            ],
            SessionEvent::CardValuesUpdated => vec![(
                Audience::Room,
                ServerMessage::CardValuesUpdated(CardValuesMessage {
                    card_values: session.card_values().as_slice().to_vec(),
                }),
            )],
            SessionEvent::RoundStarted => vec![(
                Audience::Room,
                ServerMessage::EstimationStarted(EstimationStartedMessage {
                    players: roster(),
                    current_story: session.current_story().map(str::to_string),
                }),
            )],
            SessionEvent::VoteSubmitted { .. } => vec![(
                Audience::Room,
                ServerMessage::VoteSubmitted(RosterMessage { players: roster() }),
            )],
            SessionEvent::CardsRevealed { average } => vec![(
                Audience::Room,
                ServerMessage::CardsRevealed(CardsRevealedMessage {
                    players: roster(),
                    average: *average,
                }),
            )],
            SessionEvent::HistoryAppended => vec![(
                Audience::Room,
                ServerMessage::HistoryUpdated(HistoryMessage {
                    history: session.history().to_vec(),
                }),
            )],
            SessionEvent::RoundReset => vec![(
                Audience::Room,
                ServerMessage::EstimationReset(RosterMessage { players: roster() }),
            )],
            SessionEvent::AdminChanged { admin } => vec![(
                Audience::Room,
                ServerMessage::NewAdmin(NewAdminMessage { admin_id: *admin }),
            )],
            SessionEvent::PlayerLeft { .. } => vec![(
                Audience::Room,
                ServerMessage::PlayerLeft(RosterMessage { players: roster() }),
            )],
            SessionEvent::SessionDeleted { .. } => Vec::new(),
        }
    }

    fn dispatch(&self, session: &Session, audience: Audience, message: ServerMessage) {
        let members = session.players().iter().map(|p| p.id());
        match audience {
            Audience::Client(id) => {
                self.room_manager.send_to(id, message);
            }
            Audience::Room => {
                self.room_manager.broadcast(members, &message);
            }
            Audience::RoomExcept(excluded) => {
                self.room_manager
                    .broadcast(members.filter(|id| *id != excluded), &message);
            }
        }
    }
}

impl SessionNotifier for BroadcastGateway {
    fn publish(&self, session: Option<&Session>, _caller: ConnectionId, events: &[SessionEvent]) {
        // A deleted session has nobody left to tell
        let Some(session) = session else {
            return;
        };

        for event in events {
            for (audience, message) in Self::transform(session, event) {
                tracing::trace!(
                    session = %session.code(),
                    message_type = message.type_name(),
                    ?audience,
                    "Dispatching"
                );
                self.dispatch(session, audience, message);
            }
        }
    }

    fn reject(&self, caller: ConnectionId, error: &SessionError) {
        self.room_manager
            .send_to(caller, ServerMessage::Error(ErrorMessage::from(error)));
    }
}
