//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `SessionNotifier` - Delivers session events and rejections to clients

mod session_notifier;

pub use session_notifier::SessionNotifier;
