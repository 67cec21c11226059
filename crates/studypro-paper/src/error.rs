use thiserror::Error;

use crate::filter::Rejection;

#[derive(Debug, Error)]
pub enum PaperError {
    #[error("no questions available, add some questions first")]
    NoQuestions,

    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("font unavailable: {0}")]
    Font(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
