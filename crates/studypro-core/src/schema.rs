/// Field names of a question record, shared by the normalizer, the
/// serialized form of [`Question`](crate::models::question::Question), and
/// CSV headers.
pub mod field {
    pub const QUESTION: &str = "question";
    pub const TYPE: &str = "type";
    pub const OPTIONS: &str = "options";
    pub const RARITY: &str = "rarity";
    pub const SECTION: &str = "section";
    pub const SUBJECT: &str = "subject";
    pub const ANSWER: &str = "answer";

    /// Older rows and manual forms use these names for the same fields.
    pub const TEXT_ALIAS: &str = "text";
    pub const KIND_ALIAS: &str = "kind";
    pub const ANSWER_ALIAS: &str = "correct_answer";
}

/// Question kinds with built-in rendering rules.
pub mod kind {
    pub const MCQ: &str = "mcq";
    pub const PARAGRAPH: &str = "paragraph";
    pub const DIAGRAM: &str = "diagram";
}

/// Defaults applied when a record omits a field.
pub mod defaults {
    pub const RARITY: &str = "common";
    pub const SECTION: &str = "A";
}

/// Column order used when exporting questions.
pub const CSV_HEADERS: [&str; 7] = [
    field::QUESTION,
    field::TYPE,
    field::OPTIONS,
    field::RARITY,
    field::SECTION,
    field::SUBJECT,
    field::ANSWER,
];

/// Delimiter used when options are flattened into a single column.
pub const OPTION_DELIMITER: char = ',';

/// Maximum number of options printed for an MCQ.
pub const MAX_OPTIONS: usize = 4;
