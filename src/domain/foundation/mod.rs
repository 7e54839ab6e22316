//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the planning poker domain.

mod errors;
mod ids;
mod round_phase;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::ConnectionId;
pub use round_phase::RoundPhase;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
