//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `websocket` - Client protocol, connection outboxes and the `SessionNotifier` implementation
//! - `http` - Top-level axum router (health probe and WebSocket route)

pub mod http;
pub mod websocket;
