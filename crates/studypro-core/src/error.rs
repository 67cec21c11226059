use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("question text is required")]
    EmptyText,

    #[error("question not found: {0}")]
    NotFound(Uuid),
}
