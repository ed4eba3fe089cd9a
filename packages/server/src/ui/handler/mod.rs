//! Connection handlers.

mod codec;
pub mod connection;
