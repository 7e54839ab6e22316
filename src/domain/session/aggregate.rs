//! Session aggregate entity.
//!
//! A session is one planning poker room: its roster, its deck, the round in
//! progress and the history of closed rounds. All round lifecycle rules live
//! here; callers only look sessions up and hand the resulting events on.
//!
//! # Authorization
//!
//! `admin_id` is the only source of truth for facilitator rights. Roster
//! position is never used to infer who the admin is.

use crate::domain::foundation::{ConnectionId, RoundPhase, StateMachine, Timestamp, ValidationError};
use crate::domain::scoring;

use super::{
    CardValues, Player, RoundRecord, SessionCode, SessionError, SessionEvent, VoteRecord,
};

/// Session aggregate - one estimation room.
///
/// # Invariants
///
/// - `admin_id` refers to a player in `players` while the session is non-empty
/// - player names are unique (exact, case-sensitive match)
/// - in `Idle`, no player holds a vote
/// - `history` is append-only
#[derive(Debug, Clone)]
pub struct Session {
    /// Room identifier; immutable.
    code: SessionCode,

    /// Display label.
    name: String,

    /// Connection currently holding facilitator rights.
    admin_id: ConnectionId,

    /// Roster in join order.
    players: Vec<Player>,

    /// Deck offered to voters.
    card_values: CardValues,

    /// Round lifecycle.
    phase: RoundPhase,

    /// Topic of the open round.
    current_story: Option<String>,

    /// Closed rounds, oldest first.
    history: Vec<RoundRecord>,
}

impl Session {
    /// Create a session with its creator as sole player and admin.
    pub fn new(
        code: SessionCode,
        name: impl Into<String>,
        creator_id: ConnectionId,
        creator_name: impl Into<String>,
        card_values: CardValues,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            admin_id: creator_id,
            players: vec![Player::new(creator_id, creator_name)],
            card_values,
            phase: RoundPhase::Idle,
            current_story: None,
            history: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn admin_id(&self) -> ConnectionId {
        self.admin_id
    }

    /// Returns the roster in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn has_player(&self, id: ConnectionId) -> bool {
        self.player(id).is_some()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn card_values(&self) -> &CardValues {
        &self.card_values
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn current_story(&self) -> Option<&str> {
        self.current_story.as_deref()
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Average over the votes currently cast.
    pub fn current_average(&self) -> Option<f64> {
        scoring::average(self.players.iter().filter_map(Player::vote))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_admin(&self, id: ConnectionId) -> bool {
        self.admin_id == id
    }

    /// Validates that the caller holds facilitator rights.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not the current admin
    pub fn authorize_admin(
        &self,
        caller: ConnectionId,
        action: &'static str,
    ) -> Result<(), SessionError> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(SessionError::forbidden(action))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Roster
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a player to the roster.
    ///
    /// The new player starts without a vote, even mid-round.
    ///
    /// # Errors
    ///
    /// - `Validation` if the connection is already in the roster
    /// - `DuplicateName` if a player with exactly this name is present
    pub fn join(
        &mut self,
        id: ConnectionId,
        name: impl Into<String>,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        let name = name.into();
        if self.has_player(id) {
            return Err(ValidationError::invalid_format(
                "sessionCode",
                "already a member of this session",
            )
            .into());
        }
        if self.players.iter().any(|p| p.name() == name) {
            return Err(SessionError::duplicate_name(name));
        }

        self.players.push(Player::new(id, name));
        Ok(vec![SessionEvent::PlayerJoined { player: id }])
    }

    /// Remove a player, passing the admin role on if needed.
    ///
    /// When the admin leaves and others remain, the oldest remaining
    /// player becomes admin. Removing an unknown id is a no-op. Removing the
    /// last player leaves an empty session; the registry deletes it.
    pub fn remove_player(&mut self, id: ConnectionId) -> Vec<SessionEvent> {
        let Some(index) = self.players.iter().position(|p| p.id() == id) else {
            return Vec::new();
        };
        self.players.remove(index);

        let Some(successor) = self.players.first().map(Player::id) else {
            return Vec::new();
        };

        let mut events = Vec::with_capacity(2);
        if self.admin_id == id {
            self.admin_id = successor;
            events.push(SessionEvent::AdminChanged { admin: successor });
        }
        events.push(SessionEvent::PlayerLeft { player: id });
        events
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Round lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the deck. Does not touch the round in progress.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not admin
    pub fn set_card_values(
        &mut self,
        caller: ConnectionId,
        card_values: CardValues,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        self.authorize_admin(caller, "update card values")?;

        self.card_values = card_values;
        Ok(vec![SessionEvent::CardValuesUpdated])
    }

    /// Open a new round on `story`.
    ///
    /// Legal from any phase. Votes of a round still open are discarded
    /// without being archived.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not admin
    pub fn start_round(
        &mut self,
        caller: ConnectionId,
        story: impl Into<String>,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        self.authorize_admin(caller, "start estimation")?;
        self.transition(RoundPhase::Collecting, "start estimation")?;

        self.clear_votes();
        self.current_story = Some(story.into());
        Ok(vec![SessionEvent::RoundStarted])
    }

    /// Record the caller's vote.
    ///
    /// Votes may change after reveal; the room then receives the revealed
    /// state again with a recomputed average. A caller who is not on the
    /// roster is ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidPhase` if no round is open
    pub fn submit_vote(
        &mut self,
        caller: ConnectionId,
        vote: impl Into<String>,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        if !self.phase.accepts_votes() {
            return Err(SessionError::invalid_phase("vote", self.phase));
        }

        let Some(player) = self.players.iter_mut().find(|p| p.id() == caller) else {
            return Ok(Vec::new());
        };
        player.cast_vote(vote.into());

        let event = if self.phase.votes_visible() {
            SessionEvent::CardsRevealed {
                average: self.current_average(),
            }
        } else {
            SessionEvent::VoteSubmitted { voter: caller }
        };
        Ok(vec![event])
    }

    /// Make all votes visible and compute the average.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not admin
    /// - `InvalidPhase` if no round is open
    pub fn reveal(&mut self, caller: ConnectionId) -> Result<Vec<SessionEvent>, SessionError> {
        self.authorize_admin(caller, "reveal cards")?;
        self.transition(RoundPhase::Revealed, "reveal cards")?;

        Ok(vec![SessionEvent::CardsRevealed {
            average: self.current_average(),
        }])
    }

    /// Close the round, archiving it if anybody voted on a named story.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not admin
    pub fn reset_round(&mut self, caller: ConnectionId) -> Result<Vec<SessionEvent>, SessionError> {
        self.authorize_admin(caller, "reset estimation")?;
        self.transition(RoundPhase::Idle, "reset estimation")?;

        let mut events = Vec::with_capacity(2);
        if let Some(record) = self.close_round() {
            self.history.push(record);
            events.push(SessionEvent::HistoryAppended);
        }

        self.clear_votes();
        self.current_story = None;
        events.push(SessionEvent::RoundReset);
        Ok(events)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn transition(&mut self, target: RoundPhase, action: &'static str) -> Result<(), SessionError> {
        let current = self.phase;
        self.phase = current
            .transition_to(target)
            .map_err(|_| SessionError::invalid_phase(action, current))?;
        Ok(())
    }

    fn close_round(&self) -> Option<RoundRecord> {
        let story_name = self.current_story.clone()?;
        // Roster order, not arrival order: voters are listed in join order.
        let votes: Vec<VoteRecord> = self
            .players
            .iter()
            .filter_map(|p| {
                p.vote().map(|vote| VoteRecord {
                    player_name: p.name().to_string(),
                    vote: vote.to_string(),
                })
            })
            .collect();

        if votes.is_empty() {
            return None;
        }

        Some(RoundRecord {
            story_name,
            timestamp: Timestamp::now(),
            average: scoring::average(votes.iter().map(|v| v.vote.as_str())),
            votes,
        })
    }

    fn clear_votes(&mut self) {
        for player in &mut self.players {
            player.clear_vote();
        }
    }
}
