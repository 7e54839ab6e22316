//! Archived estimation rounds.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// One player's vote as recorded in the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub player_name: String,
    pub vote: String,
}

/// Snapshot of a closed round. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub story_name: String,
    pub timestamp: Timestamp,
    /// Only players who voted, in roster order.
    pub votes: Vec<VoteRecord>,
    pub average: Option<f64>,
}
