//! studypro-paper
//!
//! Question paper generation: filtering, section grouping, text cleanup,
//! pagination, and PDF output.

pub mod clean;
pub mod error;
pub mod filter;
pub mod font;
pub mod generate;
pub mod group;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod styles;
