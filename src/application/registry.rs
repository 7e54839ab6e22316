//! SessionRegistry - process-wide map from session code to session.
//!
//! The registry is an owned value, constructed once at startup and handed to
//! the session engine, which is its only user. Nothing here is global, so
//! each test can build its own.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::foundation::ConnectionId;
use crate::domain::session::{CardValues, Session, SessionCode, SessionError};

/// Owns every live session.
///
/// # Invariants
///
/// - codes are unique among live sessions
/// - no stored session is empty once a removal has been processed
pub struct SessionRegistry {
    sessions: HashMap<SessionCode, Session>,
    rng: StdRng,
}

impl SessionRegistry {
    /// Create an empty registry seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty registry with a deterministic code sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            sessions: HashMap::new(),
            rng,
        }
    }

    /// Create a session under a fresh code with the creator as admin.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        creator_id: ConnectionId,
        creator_name: impl Into<String>,
        card_values: CardValues,
    ) -> &Session {
        let sessions = &self.sessions;
        let code = SessionCode::generate_unique(&mut self.rng, |c| sessions.contains_key(c));

        let session = Session::new(code.clone(), name, creator_id, creator_name, card_values);
        self.sessions.entry(code).or_insert(session)
    }

    /// Look a session up by code.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this code
    pub fn lookup(&self, code: &SessionCode) -> Result<&Session, SessionError> {
        self.sessions
            .get(code)
            .ok_or_else(|| SessionError::not_found(code.as_str()))
    }

    /// Look a session up by code for mutation.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this code
    pub fn lookup_mut(&mut self, code: &SessionCode) -> Result<&mut Session, SessionError> {
        self.sessions
            .get_mut(code)
            .ok_or_else(|| SessionError::not_found(code.as_str()))
    }

    /// Delete the session if its roster is empty. Returns true if deleted.
    pub fn remove_if_empty(&mut self, code: &SessionCode) -> bool {
        let empty = self.sessions.get(code).is_some_and(Session::is_empty);
        if empty {
            self.sessions.remove(code);
        }
        empty
    }

    pub fn contains(&self, code: &SessionCode) -> bool {
        self.sessions.contains_key(code)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
