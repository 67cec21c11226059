//! Persisted key conventions.
//!
//! Key names of the values a session keeps in its key/value store. Every
//! value is a string: counters in decimal, lists as JSON arrays.

/// Counter of generated papers, stored as a decimal string.
pub const PAPERS_GENERATED: &str = "papersGenerated";

/// Counter of added questions, stored as a decimal string.
pub const QUESTIONS_ADDED: &str = "questionsAdded";

/// JSON array of `{date, count}` points for generated papers.
pub const PAPERS_TIMELINE: &str = "papersTimeline";

/// JSON array of `{date, count}` points for added questions.
pub const QUESTIONS_TIMELINE: &str = "questionsTimeline";

/// JSON array of stored questions.
pub const QUESTIONS: &str = "questions";
