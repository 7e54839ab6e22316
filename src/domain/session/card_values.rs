//! The deck of vote labels offered to players.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::SessionError;

/// Built-in decks the facilitator can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CardPreset {
    /// `1 2 3 5 8 13 21 34 55`
    #[default]
    Fibonacci,
    /// `XS S M L XL XXL`
    #[serde(rename = "tshirt")]
    TShirt,
    /// `1 2 4 8 16 32 64`
    PowersOfTwo,
}

impl CardPreset {
    /// Returns the labels of this preset, in display order.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            CardPreset::Fibonacci => &["1", "2", "3", "5", "8", "13", "21", "34", "55"],
            CardPreset::TShirt => &["XS", "S", "M", "L", "XL", "XXL"],
            CardPreset::PowersOfTwo => &["1", "2", "4", "8", "16", "32", "64"],
        }
    }
}

impl fmt::Display for CardPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardPreset::Fibonacci => "fibonacci",
            CardPreset::TShirt => "tshirt",
            CardPreset::PowersOfTwo => "powers_of_two",
        };
        write!(f, "{}", s)
    }
}

/// Ordered, non-empty set of distinct vote labels.
///
/// # Invariants
///
/// - at least one label
/// - every label is non-blank and trimmed
/// - no label appears twice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CardValues(Vec<String>);

impl CardValues {
    /// Validates a facilitator-supplied list of labels.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the list is empty, has a blank label, or
    ///   repeats a label
    pub fn new<I, S>(labels: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut values = Vec::new();

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                return Err(SessionError::invalid_config("card values cannot be blank"));
            }
            if !seen.insert(label.to_string()) {
                return Err(SessionError::invalid_config(format!(
                    "duplicate card value '{}'",
                    label
                )));
            }
            values.push(label.to_string());
        }

        if values.is_empty() {
            return Err(SessionError::invalid_config(
                "at least one card value is required",
            ));
        }

        Ok(Self(values))
    }

    /// Returns the labels of a built-in preset.
    pub fn from_preset(preset: CardPreset) -> Self {
        Self(preset.labels().iter().map(|s| s.to_string()).collect())
    }

    /// Returns the labels in display order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the deck has no labels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CardValues {
    fn default() -> Self {
        Self::from_preset(CardPreset::default())
    }
}
