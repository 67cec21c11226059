//! studypro-storage
//!
//! Persistence for a StudyPro session. Everything is stored as string
//! values under string keys; typed state and the stats tracker sit on top.

pub mod error;
pub mod objects;
pub mod state;
pub mod stats;
