use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV has no `question` column")]
    MissingQuestionColumn,

    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("page {page} does not exist, the document has {pages} pages")]
    PageOutOfRange { page: usize, pages: usize },

    #[error("lines {start}-{end} are not on this page, it has {lines} lines")]
    LineRange {
        start: usize,
        end: usize,
        lines: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
