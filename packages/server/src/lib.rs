//! Multi-room chat relay library.
//!
//! Clients discover rooms, log in to one, and exchange messages over a
//! bidirectional WebSocket stream. Each message is fanned out to every
//! connection currently bound to its room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
