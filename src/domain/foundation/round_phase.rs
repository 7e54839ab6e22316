//! RoundPhase enum for tracking the estimation round of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Where the current estimation round stands.
///
/// ```text
/// Idle ──startRound──▶ Collecting ──reveal──▶ Revealed
///  ▲                      ▲   │                  │
///  │                      └───┴───startRound─────┤
///  └─────────────────────resetRound──────────────┘
/// ```
///
/// `startRound` and `resetRound` are accepted from every phase; only
/// `reveal` requires a round to be open.
///
/// There is no terminal phase: a session ends by deletion, not by
/// reaching a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No round in progress. Nobody holds a vote.
    #[default]
    Idle,
    /// Votes are being cast and are hidden from other players.
    Collecting,
    /// Votes are visible to everyone; late votes are still accepted.
    Revealed,
}

impl RoundPhase {
    /// Returns true if players may cast or change votes.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, RoundPhase::Collecting | RoundPhase::Revealed)
    }

    /// Returns true if vote values may be shown to the room.
    pub fn votes_visible(&self) -> bool {
        matches!(self, RoundPhase::Revealed)
    }
}

impl StateMachine for RoundPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RoundPhase::*;
        match target {
            // startRound and resetRound are legal from anywhere.
            Collecting | Idle => true,
            Revealed => matches!(self, Collecting | Revealed),
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RoundPhase::*;
        match self {
            Idle => vec![Idle, Collecting],
            Collecting | Revealed => vec![Idle, Collecting, Revealed],
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundPhase::Idle => "Idle",
            RoundPhase::Collecting => "Collecting",
            RoundPhase::Revealed => "Revealed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [RoundPhase; 3] = [RoundPhase::Idle, RoundPhase::Collecting, RoundPhase::Revealed];

    #[test]
    fn default_is_idle() {
        assert_eq!(RoundPhase::default(), RoundPhase::Idle);
    }

    #[test]
    fn start_round_is_legal_from_every_phase() {
        for phase in ALL {
            assert!(phase.can_transition_to(&RoundPhase::Collecting), "{:?}", phase);
        }
    }

    #[test]
    fn reset_is_legal_from_every_phase() {
        for phase in ALL {
            assert!(phase.can_transition_to(&RoundPhase::Idle), "{:?}", phase);
        }
    }

    #[test]
    fn idle_cannot_be_revealed() {
        assert!(RoundPhase::Idle.transition_to(RoundPhase::Revealed).is_err());
    }

    #[test]
    fn collecting_can_be_revealed() {
        assert_eq!(
            RoundPhase::Collecting.transition_to(RoundPhase::Revealed),
            Ok(RoundPhase::Revealed)
        );
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn only_collecting_and_revealed_accept_votes() {
        assert!(!RoundPhase::Idle.accepts_votes());
        assert!(RoundPhase::Collecting.accepts_votes());
        assert!(RoundPhase::Revealed.accepts_votes());
    }

    #[test]
    fn only_revealed_shows_votes() {
        assert!(!RoundPhase::Idle.votes_visible());
        assert!(!RoundPhase::Collecting.votes_visible());
        assert!(RoundPhase::Revealed.votes_visible());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&RoundPhase::Collecting).unwrap(),
            "\"collecting\""
        );
        let phase: RoundPhase = serde_json::from_str("\"revealed\"").unwrap();
        assert_eq!(phase, RoundPhase::Revealed);
    }
}
