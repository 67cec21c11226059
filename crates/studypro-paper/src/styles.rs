use serde::{Deserialize, Serialize};

/// Layout constants for a question paper, in PDF points.
///
/// Vertical positions grow downwards from the top edge of the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperStyles {
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,

    /// Height consumed by one wrapped line of question text.
    pub line_height: f32,

    /// Left edge of option lines and the diagram placeholder.
    pub option_indent: f32,

    /// Space after each question.
    pub question_gap: f32,

    /// Space between a section header and its first question.
    pub section_header_gap: f32,

    /// Space after the last question of a section.
    pub section_gap: f32,

    /// Header block spacing: after the title, after the subject line (the
    /// divider sits `divider_offset` below the subject baseline), after the
    /// metadata row, and after the instructions.
    pub title_gap: f32,
    pub subject_gap: f32,
    pub divider_offset: f32,
    pub divider_thickness: f32,
    pub meta_gap: f32,
    pub header_gap: f32,

    pub title_size: f32,
    pub subject_size: f32,
    pub meta_size: f32,
    pub section_size: f32,
    pub body_size: f32,
}

impl Default for PaperStyles {
    fn default() -> Self {
        Self {
            margin_left: 40.0,
            margin_right: 40.0,
            margin_top: 60.0,
            margin_bottom: 60.0,
            line_height: 14.0,
            option_indent: 60.0,
            question_gap: 8.0,
            section_header_gap: 20.0,
            section_gap: 10.0,
            title_gap: 24.0,
            subject_gap: 26.0,
            divider_offset: 6.0,
            divider_thickness: 0.7,
            meta_gap: 20.0,
            header_gap: 10.0,
            title_size: 18.0,
            subject_size: 14.0,
            meta_size: 10.0,
            section_size: 13.0,
            body_size: 11.0,
        }
    }
}

impl PaperStyles {
    /// Width available to question text on a page of `page_width`.
    pub fn content_width(&self, page_width: f32) -> f32 {
        page_width - self.margin_left - self.margin_right
    }

    /// Width available to an indented option line.
    pub fn option_width(&self, page_width: f32) -> f32 {
        page_width - self.option_indent - self.margin_right
    }

    /// Lowest y a block may reach before it must move to a new page.
    pub fn bottom_limit(&self, page_height: f32) -> f32 {
        page_height - self.margin_bottom
    }
}
