//! Scoring - pure computations over a round's votes.
//!
//! Scoring knows nothing about decks or presets: a label counts if it
//! parses as a finite number, whatever deck it came from.

mod average;

pub use average::{average, parse_numeric_vote};
