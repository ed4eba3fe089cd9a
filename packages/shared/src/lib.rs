//! Shared utilities for the chatline workspace.
//!
//! Logging setup and the clock abstraction used to stamp chat lines.

pub mod logger;
pub mod time;
