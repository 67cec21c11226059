//! studypro-cli library root.
//!
//! Re-exports the command layer so integration tests can drive it with an
//! in-memory store instead of the files under the user's data directory.

pub mod cli;
pub mod commands;
pub mod config;
pub mod state;
