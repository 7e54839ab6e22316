//! Session domain module.
//!
//! Handles the planning poker room lifecycle: creation by a facilitator,
//! players joining and leaving, hidden voting, reveal, and the history of
//! closed rounds.
//!
//! # Events
//!
//! Every mutation returns the [`SessionEvent`]s it produced; see
//! [`events`] for the full list.

mod aggregate;
mod card_values;
mod code;
mod errors;
pub mod events;
mod player;
mod round;

pub use aggregate::Session;
pub use card_values::{CardPreset, CardValues};
pub use code::{SessionCode, CODE_ALPHABET, CODE_LENGTH};
pub use errors::SessionError;
pub use events::SessionEvent;
pub use player::{normalize_player_name, Player};
pub use round::{RoundRecord, VoteRecord};
