//! TCP chat server implementation.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{DEFAULT_HOST, DEFAULT_PORT, Server};
pub use signal::shutdown_signal;
