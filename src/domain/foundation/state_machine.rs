//! Validated transitions for lifecycle enums such as [`RoundPhase`](super::RoundPhase).

use super::ValidationError;

/// A lifecycle enum with a fixed transition table.
///
/// Implementors list the legal moves; `transition_to` checks against them.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from `self` to `target` is legal.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one move from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns `target` if the move is legal.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "phase",
                format!("cannot move from {:?} to {:?}", self, target),
            ))
        }
    }
}
