//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, phases, errors)
//! - `session` - Planning poker room lifecycle, roster and round history
//! - `scoring` - Pure vote scoring (numeric average)

pub mod foundation;
pub mod scoring;
pub mod session;
