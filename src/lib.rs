//! Planning Poker - Real-time agile estimation sessions
//!
//! This crate implements a WebSocket server where a facilitator opens a
//! session, players join by code, vote in hidden rounds, and the room sees
//! the votes and their average on reveal.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
