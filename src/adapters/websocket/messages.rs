//! WebSocket message types for the planning poker protocol.
//!
//! Every frame is a JSON object with a `type` tag:
//! - Client → Server: session commands and heartbeat pings
//! - Server → Client: snapshots, roster updates, round updates, errors

use serde::{Deserialize, Serialize};

use crate::application::{
    CreateSessionCommand, DeckSelection, EstimateAgainCommand, JoinSessionCommand,
    RevealCardsCommand, SessionCommand, StartEstimationCommand, SubmitVoteCommand,
    UpdateCardValuesCommand,
};
use crate::domain::foundation::{ConnectionId, ErrorCode, RoundPhase, Timestamp};
use crate::domain::session::{CardPreset, RoundRecord, Session, SessionError};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Connection established; carries the server-assigned id.
    Connected(ConnectedMessage),

    /// Full snapshot for the creator of a session.
    SessionCreated(SessionSnapshot),

    /// Full snapshot for a player who just joined.
    SessionJoined(SessionSnapshot),

    PlayerJoined(RosterMessage),
    PlayerLeft(RosterMessage),
    NewAdmin(NewAdminMessage),
    CardValuesUpdated(CardValuesMessage),
    EstimationStarted(EstimationStartedMessage),
    VoteSubmitted(RosterMessage),
    CardsRevealed(CardsRevealedMessage),
    HistoryUpdated(HistoryMessage),
    EstimationReset(RosterMessage),

    /// Command rejected or frame malformed.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent once, right after the upgrade.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub client_id: ConnectionId,
    pub timestamp: String,
}

/// Roster entry as seen by clients.
///
/// `vote` is present only once the round is revealed; before that clients
/// learn only whether someone has voted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: ConnectionId,
    pub name: String,
    pub is_admin: bool,
    pub has_voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<String>,
}

impl PlayerView {
    /// Projects the roster of `session`, in join order.
    pub fn roster(session: &Session) -> Vec<PlayerView> {
        let visible = session.phase().votes_visible();
        session
            .players()
            .iter()
            .map(|player| PlayerView {
                id: player.id(),
                name: player.name().to_string(),
                is_admin: session.is_admin(player.id()),
                has_voted: player.has_voted(),
                vote: if visible {
                    player.vote().map(str::to_string)
                } else {
                    None
                },
            })
            .collect()
    }
}

/// Everything a client needs to render a session it just entered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_code: String,
    pub session_name: String,
    pub is_admin: bool,
    pub admin_id: ConnectionId,
    pub players: Vec<PlayerView>,
    pub card_values: Vec<String>,
    pub phase: RoundPhase,
    pub current_story: Option<String>,
    pub history: Vec<RoundRecord>,
}

impl SessionSnapshot {
    /// Snapshot of `session` as seen by `viewer`.
    pub fn new(session: &Session, viewer: ConnectionId) -> Self {
        Self {
            session_code: session.code().to_string(),
            session_name: session.name().to_string(),
            is_admin: session.is_admin(viewer),
            admin_id: session.admin_id(),
            players: PlayerView::roster(session),
            card_values: session.card_values().as_slice().to_vec(),
            phase: session.phase(),
            current_story: session.current_story().map(str::to_string),
            history: session.history().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterMessage {
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdminMessage {
    pub admin_id: ConnectionId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardValuesMessage {
    pub card_values: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationStartedMessage {
    pub players: Vec<PlayerView>,
    pub current_story: Option<String>,
}

/// Revealed votes. `average` is null when no vote is numeric.
#[derive(Debug, Clone, Serialize)]
pub struct CardsRevealedMessage {
    pub players: Vec<PlayerView>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryMessage {
    pub history: Vec<RoundRecord>,
}

/// Error message sent to a single client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.into(),
        }
    }
}

impl From<&SessionError> for ErrorMessage {
    fn from(error: &SessionError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

impl ServerMessage {
    pub fn connected(client_id: ConnectionId) -> Self {
        ServerMessage::Connected(ConnectedMessage {
            client_id,
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage::new(code, message))
    }

    /// Returns the wire `type` tag, for logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            ServerMessage::Connected(_) => "connected",
            ServerMessage::SessionCreated(_) => "sessionCreated",
            ServerMessage::SessionJoined(_) => "sessionJoined",
            ServerMessage::PlayerJoined(_) => "playerJoined",
            ServerMessage::PlayerLeft(_) => "playerLeft",
            ServerMessage::NewAdmin(_) => "newAdmin",
            ServerMessage::CardValuesUpdated(_) => "cardValuesUpdated",
            ServerMessage::EstimationStarted(_) => "estimationStarted",
            ServerMessage::VoteSubmitted(_) => "voteSubmitted",
            ServerMessage::CardsRevealed(_) => "cardsRevealed",
            ServerMessage::HistoryUpdated(_) => "historyUpdated",
            ServerMessage::EstimationReset(_) => "estimationReset",
            ServerMessage::Error(_) => "error",
            ServerMessage::Pong(_) => "pong",
        }
    }
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    CreateSession(CreateSessionRequest),
    JoinSession(JoinSessionRequest),
    UpdateCardValues(UpdateCardValuesRequest),
    StartEstimation(StartEstimationRequest),
    SubmitVote(SubmitVoteRequest),
    RevealCards(SessionRequest),
    EstimateAgain(SessionRequest),

    /// Heartbeat request.
    Ping,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub player_name: String,
    #[serde(default)]
    pub session_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionRequest {
    pub session_code: String,
    pub player_name: String,
}

/// Either `cardValues` or `preset`; `cardValues` wins when both are sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardValuesRequest {
    pub session_code: String,
    #[serde(default)]
    pub card_values: Option<Vec<String>>,
    #[serde(default)]
    pub preset: Option<CardPreset>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartEstimationRequest {
    pub session_code: String,
    #[serde(default)]
    pub story_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    pub session_code: String,
    pub vote: String,
}

/// Commands that carry nothing but the target session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_code: String,
}

impl ClientMessage {
    /// Converts the frame into an engine command issued by `connection_id`.
    ///
    /// Returns `None` for frames answered by the connection itself.
    pub fn into_command(self, connection_id: ConnectionId) -> Option<SessionCommand> {
        let command = match self {
            ClientMessage::CreateSession(req) => {
                SessionCommand::CreateSession(CreateSessionCommand {
                    connection_id,
                    player_name: req.player_name,
                    session_name: req.session_name,
                })
            }
            ClientMessage::JoinSession(req) => SessionCommand::JoinSession(JoinSessionCommand {
                connection_id,
                session_code: req.session_code,
                player_name: req.player_name,
            }),
            ClientMessage::UpdateCardValues(req) => {
                let selection = match (req.card_values, req.preset) {
                    (Some(labels), _) => DeckSelection::Custom(labels),
                    (None, Some(preset)) => DeckSelection::Preset(preset),
                    (None, None) => DeckSelection::Custom(Vec::new()),
                };
                SessionCommand::UpdateCardValues(UpdateCardValuesCommand {
                    connection_id,
                    session_code: req.session_code,
                    selection,
                })
            }
            ClientMessage::StartEstimation(req) => {
                SessionCommand::StartEstimation(StartEstimationCommand {
                    connection_id,
                    session_code: req.session_code,
                    story_name: req.story_name,
                })
            }
            ClientMessage::SubmitVote(req) => SessionCommand::SubmitVote(SubmitVoteCommand {
                connection_id,
                session_code: req.session_code,
                vote: req.vote,
            }),
            ClientMessage::RevealCards(req) => SessionCommand::RevealCards(RevealCardsCommand {
                connection_id,
                session_code: req.session_code,
            }),
            ClientMessage::EstimateAgain(req) => {
                SessionCommand::EstimateAgain(EstimateAgainCommand {
                    connection_id,
                    session_code: req.session_code,
                })
            }
            ClientMessage::Ping => return None,
        };
        Some(command)
    }
}
