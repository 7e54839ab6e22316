//! WebSocket upgrade handler for planning poker connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Assign a connection id and register its outbox
//! 2. Send `connected`
//! 3. Forward decoded commands to the session engine
//! 4. Drain the outbox onto the socket until either side closes
//! 5. Tell the engine the connection is gone and drop the outbox

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::application::EngineCommand;
use crate::domain::foundation::{ConnectionId, ErrorCode};

use super::{
    messages::{ClientMessage, ServerMessage},
    rooms::RoomManager,
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Outboxes of all live connections.
    pub room_manager: Arc<RoomManager>,
    /// Inbound queue of the session engine.
    pub engine: mpsc::Sender<EngineCommand>,
}

impl WebSocketState {
    /// Create a new WebSocket state.
    pub fn new(room_manager: Arc<RoomManager>, engine: mpsc::Sender<EngineCommand>) -> Self {
        Self {
            room_manager,
            engine,
        }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// This function runs for the lifetime of the connection, handling:
/// - Forwarding the connection's outbox to the client
/// - Decoding client frames into engine commands
/// - Cleanup on disconnect
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = ConnectionId::new();
    let mut outbox = state.room_manager.connect(client_id);
    tracing::debug!(client_id = %client_id, "Client connected");

    if let Err(e) = send_message(&mut sender, &ServerMessage::connected(client_id)).await {
        tracing::debug!("Failed to send connected message: {}", e);
        state.room_manager.disconnect(client_id);
        return; // Client disconnected immediately
    }

    // Spawn task to forward queued messages to client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbox.recv().await {
            if let Err(e) = send_message(&mut sender, &msg).await {
                tracing::debug!(
                    client_id = %client_id,
                    "Send error, closing connection: {}",
                    e
                );
                break;
            }
        }
    });

    // Handle incoming messages from client
    let room_manager = state.room_manager.clone();
    let engine = state.engine.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    if !handle_text(client_id, &text, &room_manager, &engine).await {
                        break;
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(client_id = %client_id, "Received unsupported binary message");
                    room_manager.send_to(
                        client_id,
                        ServerMessage::error(ErrorCode::BadRequest, "Binary frames are not supported"),
                    );
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // WebSocket protocol ping/pong - handled automatically by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(client_id = %client_id, "Client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(client_id = %client_id, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    if state
        .engine
        .send(EngineCommand::Disconnect {
            connection_id: client_id,
        })
        .await
        .is_err()
    {
        tracing::warn!(client_id = %client_id, "Session engine stopped before disconnect");
    }
    state.room_manager.disconnect(client_id);
    tracing::debug!(client_id = %client_id, "Client disconnected");
}

/// Decode one text frame and act on it.
///
/// Returns false once the engine is gone and the connection should close.
async fn handle_text(
    client_id: ConnectionId,
    text: &str,
    room_manager: &RoomManager,
    engine: &mpsc::Sender<EngineCommand>,
) -> bool {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(client_id = %client_id, "Malformed frame: {}", e);
            room_manager.send_to(
                client_id,
                ServerMessage::error(ErrorCode::BadRequest, format!("Malformed message: {}", e)),
            );
            return true;
        }
    };

    match message.into_command(client_id) {
        Some(command) => {
            tracing::trace!(client_id = %client_id, command = command.name(), "Received command");
            if engine.send(EngineCommand::Execute(command)).await.is_err() {
                tracing::warn!(client_id = %client_id, "Session engine stopped, closing connection");
                return false;
            }
        }
        None => {
            tracing::trace!(client_id = %client_id, "Received ping");
            room_manager.send_to(client_id, ServerMessage::pong());
        }
    }
    true
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json)).await,
        Err(e) => {
            tracing::error!(message_type = msg.type_name(), "Failed to serialize message: {}", e);
            Ok(())
        }
    }
}

/// Create axum router for the WebSocket endpoint.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .merge(websocket_router())
///     .with_state(ws_state);
/// ```
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
