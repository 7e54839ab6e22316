//! WebSocket room management for session-based message routing.
//!
//! Every connection owns a bounded outbox drained by its socket task. A
//! room is the set of connections on a session's roster, so the manager
//! only tracks outboxes; callers name the members to reach.
//!
//! # Architecture
//!
//! ```text
//! Room: AB12C          Room: QX9P0
//! ├── client-a         ├── client-d
//! ├── client-b         └── client-e
//! └── client-c
//! ```
//!
//! When something happens in AB12C, only clients a, b, c receive it.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::foundation::ConnectionId;

use super::messages::ServerMessage;

/// Sending half of a connection's outbox.
pub type Outbox = mpsc::Sender<ServerMessage>;

/// Manages the outboxes of all live WebSocket connections.
///
/// Provides:
/// - Connection registration and removal
/// - Unicast to one connection
/// - Broadcast to the members of a room
///
/// # Thread Safety
///
/// Uses `RwLock` for the outbox registry since sends (reads) vastly
/// outnumber connects/disconnects (writes). No lock is held across an
/// await point; sends use `try_send`.
pub struct RoomManager {
    /// Map of client_id → outbox sender.
    clients: RwLock<HashMap<ConnectionId, Outbox>>,

    /// Buffer size of each connection's outbox.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with specified outbox capacity.
    ///
    /// # Arguments
    ///
    /// * `channel_capacity` - Buffer size for each connection's outbox.
    ///   A client that falls this far behind starts losing messages.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Register a connection and return the receiving half of its outbox.
    ///
    /// Registering an id twice replaces the earlier outbox.
    pub fn connect(&self, client_id: ConnectionId) -> mpsc::Receiver<ServerMessage> {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.write().insert(client_id, tx);
        rx
    }

    /// Forget a connection. Later sends to it are dropped.
    pub fn disconnect(&self, client_id: ConnectionId) {
        self.write().remove(&client_id);
    }

    /// Queue a message for one connection.
    ///
    /// Returns false if the client is gone or its outbox is full.
    pub fn send_to(&self, client_id: ConnectionId, message: ServerMessage) -> bool {
        let clients = self.read();
        match clients.get(&client_id) {
            Some(outbox) => Self::deliver(client_id, outbox, message),
            None => false,
        }
    }

    /// Queue a message for every listed member.
    ///
    /// Returns the number of members the message was queued for.
    pub fn broadcast<I>(&self, members: I, message: &ServerMessage) -> usize
    where
        I: IntoIterator<Item = ConnectionId>,
    {
        let clients = self.read();
        members
            .into_iter()
            .filter(|id| {
                clients
                    .get(id)
                    .is_some_and(|outbox| Self::deliver(*id, outbox, message.clone()))
            })
            .count()
    }

    /// Get total count of connected clients.
    pub fn client_count(&self) -> usize {
        self.read().len()
    }

    fn deliver(client_id: ConnectionId, outbox: &Outbox, message: ServerMessage) -> bool {
        match outbox.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                tracing::warn!(
                    client_id = %client_id,
                    message_type = message.type_name(),
                    "Outbox full, dropping message"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(client_id = %client_id, "Outbox closed");
                false
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ConnectionId, Outbox>> {
        self.clients.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ConnectionId, Outbox>> {
        self.clients.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
