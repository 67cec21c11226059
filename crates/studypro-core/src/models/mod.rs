pub mod question;
pub mod stats;
pub mod summary;
