//! WebSocket adapters for the planning poker protocol.
//!
//! This module connects browser clients to the session engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │          ws handler (one task pair per connection)        │
//! │   decode frame → EngineCommand        outbox → socket     │
//! └──────────────────────────────────────────────────────────┘
//!               │ mpsc                         ▲
//!               ▼                              │ try_send
//! ┌────────────────────────┐       ┌────────────────────────┐
//! │     SessionEngine      │──────▶│    BroadcastGateway    │
//! │  (single consumer)     │ events│  events → messages     │
//! └────────────────────────┘       └────────────────────────┘
//!                                              │
//!                                              ▼
//!                                  ┌────────────────────────┐
//!                                  │      RoomManager       │
//!                                  │  outbox per connection │
//!                                  └────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`rooms`] - Connection outboxes and room fan-out
//! - [`handler`] - Axum WebSocket upgrade handler
//! - [`gateway`] - Session events to room broadcasts

pub mod gateway;
pub mod handler;
pub mod messages;
pub mod rooms;

pub use gateway::{Audience, BroadcastGateway};
pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use messages::{ClientMessage, ErrorMessage, PlayerView, ServerMessage, SessionSnapshot};
pub use rooms::{Outbox, RoomManager};
