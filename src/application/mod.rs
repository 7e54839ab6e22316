//! Application layer - Commands, Handlers, and the session engine.
//!
//! This layer orchestrates domain operations. Client commands arrive at the
//! [`SessionEngine`], which routes each one to its handler against the
//! [`SessionRegistry`] and hands the resulting events to a notifier port.

mod engine;
pub mod handlers;
mod registry;

pub use engine::{EngineCommand, SessionEngine};
pub use handlers::session::{
    CommandOutcome, CreateSessionCommand, DeckSelection, EstimateAgainCommand,
    JoinSessionCommand, RevealCardsCommand, SessionCommand, SessionDefaults,
    StartEstimationCommand, SubmitVoteCommand, UpdateCardValuesCommand,
};
pub use registry::SessionRegistry;
