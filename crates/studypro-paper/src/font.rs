use std::path::PathBuf;

use crate::error::PaperError;

/// Where the embedded paper font comes from.
///
/// A failing source is not fatal: generation logs a warning and keeps the
/// renderer's built-in font.
pub trait FontSource {
    fn load(&self) -> Result<Vec<u8>, PaperError>;
}

/// A TrueType font read from disk.
#[derive(Debug, Clone)]
pub struct FileFont(pub PathBuf);

impl FontSource for FileFont {
    fn load(&self) -> Result<Vec<u8>, PaperError> {
        std::fs::read(&self.0)
            .map_err(|e| PaperError::Font(format!("{}: {e}", self.0.display())))
    }
}

/// No custom font configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFont;

impl FontSource for NoFont {
    fn load(&self) -> Result<Vec<u8>, PaperError> {
        Err(PaperError::Font("no font configured".to_string()))
    }
}
