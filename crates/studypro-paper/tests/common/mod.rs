#![allow(dead_code)]

use studypro_core::models::question::{Question, QuestionKind};
use studypro_paper::error::PaperError;
use studypro_paper::render::{Align, DocumentRenderer, wrap_text};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    EmbedFont,
    FontSize(f32),
    Text {
        text: String,
        x: f32,
        y: f32,
        align: Align,
        page: usize,
    },
    Line {
        y: f32,
        page: usize,
    },
    AddPage,
}

/// Records every drawing call. Glyphs are half an em wide, so wrapping is
/// predictable.
pub struct RecordingRenderer {
    pub ops: Vec<Op>,
    pub width: f32,
    pub height: f32,
    pub accept_font: bool,
    font_size: f32,
    pages: usize,
}

impl RecordingRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            ops: Vec::new(),
            width,
            height,
            accept_font: true,
            font_size: 11.0,
            pages: 1,
        }
    }

    pub fn a4() -> Self {
        Self::new(595.28, 841.89)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Page the first text starting with `prefix` was drawn on.
    pub fn page_of(&self, prefix: &str) -> Option<usize> {
        self.ops.iter().find_map(|op| match op {
            Op::Text { text, page, .. } if text.starts_with(prefix) => Some(*page),
            _ => None,
        })
    }
}

impl DocumentRenderer for RecordingRenderer {
    type Output = Vec<Op>;

    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn embed_font(&mut self, _bytes: &[u8]) -> Result<(), PaperError> {
        if !self.accept_font {
            return Err(PaperError::Font("rejected".to_string()));
        }
        self.ops.push(Op::EmbedFont);
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.ops.push(Op::FontSize(size));
    }

    fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String> {
        let size = self.font_size;
        wrap_text(text, max_width, |s| s.chars().count() as f32 * size * 0.5)
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            align,
            page: self.pages,
        });
    }

    fn line(&mut self, _x1: f32, y1: f32, _x2: f32, _y2: f32, _thickness: f32) {
        self.ops.push(Op::Line {
            y: y1,
            page: self.pages,
        });
    }

    fn add_page(&mut self) {
        self.pages += 1;
        self.ops.push(Op::AddPage);
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn save(self, _filename: &str) -> Result<Vec<Op>, PaperError> {
        Ok(self.ops)
    }
}

pub fn question(text: &str, kind: QuestionKind, section: &str) -> Question {
    Question {
        kind,
        section: section.to_string(),
        ..Question::paragraph(text, "Science")
    }
}

pub fn mcq(text: &str, options: &[&str]) -> Question {
    Question {
        options: options.iter().map(|o| o.to_string()).collect(),
        ..question(text, QuestionKind::Mcq, "A")
    }
}
