//! studypro-core
//!
//! Domain types for question papers. Everything that builds a paper or
//! persists a question goes through the `Question` record defined here.
//! Nothing in this crate touches the filesystem or the network.

pub mod error;
pub mod models;
pub mod normalize;
pub mod schema;
pub mod storage_keys;
pub mod store;
