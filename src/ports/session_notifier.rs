//! SessionNotifier port - Interface for telling clients what happened.
//!
//! The session engine applies commands and hands the resulting events to a
//! notifier together with the session as it stands afterwards. The notifier
//! decides who hears about each event and what they receive.

use std::sync::Arc;

use crate::domain::foundation::ConnectionId;
use crate::domain::session::{Session, SessionError, SessionEvent};

/// Port for delivering session outcomes to connected clients.
///
/// Implementations must ensure:
/// - Delivery never blocks the caller (slow clients lose frames instead)
/// - Messages to one client arrive in the order they were handed over
/// - Nothing about a session reaches a connection that is not on its roster,
///   apart from the caller's own unicast replies
pub trait SessionNotifier: Send + Sync {
    /// Deliver the events a command produced.
    ///
    /// `session` is `None` when the command removed the session.
    fn publish(&self, session: Option<&Session>, caller: ConnectionId, events: &[SessionEvent]);

    /// Tell the caller its command was rejected.
    fn reject(&self, caller: ConnectionId, error: &SessionError);
}

impl<T: SessionNotifier + ?Sized> SessionNotifier for Arc<T> {
    fn publish(&self, session: Option<&Session>, caller: ConnectionId, events: &[SessionEvent]) {
        (**self).publish(session, caller, events)
    }

    fn reject(&self, caller: ConnectionId, error: &SessionError) {
        (**self).reject(caller, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn SessionNotifier) {}

    #[test]
    fn session_notifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionNotifier>();
    }
}
