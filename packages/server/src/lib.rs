//! Line-oriented TCP chat server library.
//!
//! Participants pick a display name, then exchange chat lines, actions and
//! private messages. The last broadcast lines are persisted and replayed to
//! newcomers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
