//! Session codes and their generator.
//!
//! A session code is the short identifier players type (or receive in a
//! shared link) to join a room: five characters drawn uniformly from
//! `A-Z0-9`. Codes are generated by rejection sampling against the set of
//! codes already in use, so the generator holds no state of its own.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Number of characters in a session code.
pub const CODE_LENGTH: usize = 5;

/// Symbols a session code is drawn from.
pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Short, human-friendly session identifier.
///
/// Always [`CODE_LENGTH`] characters of [`CODE_ALPHABET`]; the
/// constructor normalises case so `"ab12c"` and `"AB12C"` are the same
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(String);

impl SessionCode {
    /// Parses user input into a code, trimming whitespace and upper-casing.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_ascii_uppercase();

        if normalized.len() != CODE_LENGTH {
            return Err(ValidationError::invalid_format(
                "sessionCode",
                format!("expected {} characters", CODE_LENGTH),
            ));
        }
        if !normalized.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return Err(ValidationError::invalid_format(
                "sessionCode",
                "only letters and digits are allowed",
            ));
        }

        Ok(Self(normalized))
    }

    /// Draws a random code. Each character is uniform over the alphabet.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Draws codes until `is_taken` returns false for one.
    pub fn generate_unique<R, F>(rng: &mut R, mut is_taken: F) -> Self
    where
        R: Rng + ?Sized,
        F: FnMut(&SessionCode) -> bool,
    {
        loop {
            let code = Self::generate(rng);
            if !is_taken(&code) {
                return code;
            }
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
