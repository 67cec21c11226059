//! studypro-bank
//!
//! Getting questions in and out: CSV import/export, remote question bank
//! fetch, and text selection from PDF pages.

pub mod csv_io;
pub mod error;
pub mod pdf_import;
pub mod remote;
