//! Pagination and layout.
//!
//! Lays a paper out top to bottom: a header block on the first page, then
//! each section header followed by its numbered questions. Every overflow
//! unit (a question stem, a single option line, the diagram placeholder) is
//! wrapped first and moved to a fresh page as a whole if it would cross the
//! bottom margin.
//!
//! The answer key is a second pass over the same sections with the same
//! numbering, printing each stem followed by its recorded answer.

use studypro_core::models::question::{Question, QuestionKind};

use crate::clean::clean_question_text;
use crate::group::SectionGroups;
use crate::render::{Align, DocumentRenderer};
use crate::styles::PaperStyles;

/// Printed under diagram questions.
pub const DIAGRAM_PLACEHOLDER: &str = "(Draw a neat labelled diagram.)";

/// Appended to the paper title on the answer key.
pub const ANSWER_KEY_SUFFIX: &str = "Answer Key";

/// Fixed content printed once at the top of page one.
#[derive(Debug, Clone)]
pub struct PaperHeader {
    pub title: String,
    pub subject: String,
    pub date: String,
    pub duration: String,
    pub total_marks: u32,
    pub instructions: Vec<String>,
}

/// Totals after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSummary {
    pub questions: usize,
    pub pages: usize,
    /// Units taller than a whole page. They are drawn unsplit and run past
    /// the bottom margin.
    pub overflows: usize,
}

pub struct LayoutEngine<'a, R: DocumentRenderer> {
    renderer: &'a mut R,
    styles: &'a PaperStyles,
    y: f32,
    question_no: usize,
    overflows: usize,
}

impl<'a, R: DocumentRenderer> LayoutEngine<'a, R> {
    pub fn new(renderer: &'a mut R, styles: &'a PaperStyles) -> Self {
        Self {
            renderer,
            styles,
            y: styles.margin_top,
            question_no: 1,
            overflows: 0,
        }
    }

    /// Current vertical cursor.
    pub fn cursor(&self) -> f32 {
        self.y
    }

    /// Draw the header block. It is assumed to fit on the first page and is
    /// not subject to overflow checks.
    pub fn draw_header(&mut self, header: &PaperHeader) {
        let s = self.styles;
        let (width, _) = self.renderer.page_size();
        let center = width / 2.0;

        self.draw_title_block(&header.title, &header.subject);

        self.renderer.set_font_size(s.meta_size);
        self.renderer.text(
            &format!("Date: {}", header.date),
            s.margin_left,
            self.y,
            Align::Left,
        );
        self.renderer.text(
            &format!("Duration: {}", header.duration),
            center,
            self.y,
            Align::Center,
        );
        self.renderer.text(
            &format!("Total: {} Marks", header.total_marks),
            width - s.margin_right,
            self.y,
            Align::Right,
        );
        self.y += s.meta_gap;

        for line in &header.instructions {
            self.renderer.text(line, s.margin_left, self.y, Align::Left);
            self.y += s.line_height;
        }
        self.y += s.header_gap;
    }

    /// Header of the answer key: the paper title marked as a key, and the
    /// subject. Dates and instructions are left to the paper itself.
    pub fn draw_answer_key_header(&mut self, header: &PaperHeader) {
        let title = format!("{} - {ANSWER_KEY_SUFFIX}", header.title);
        self.draw_title_block(&title, &header.subject);
        self.y += self.styles.header_gap;
    }

    fn draw_title_block(&mut self, title: &str, subject: &str) {
        let s = self.styles;
        let (width, _) = self.renderer.page_size();
        let center = width / 2.0;

        self.y = s.margin_top;

        self.renderer.set_font_size(s.title_size);
        self.renderer.text(title, center, self.y, Align::Center);
        self.y += s.title_gap;

        self.renderer.set_font_size(s.subject_size);
        self.renderer
            .text(&subject.to_uppercase(), center, self.y, Align::Center);
        let divider_y = self.y + s.divider_offset;
        self.renderer.line(
            s.margin_left,
            divider_y,
            width - s.margin_right,
            divider_y,
            s.divider_thickness,
        );
        self.y += s.subject_gap;
    }

    /// Draw every section in order. Question numbers run on across sections.
    pub fn draw_sections(&mut self, sections: &SectionGroups<'_>) {
        self.walk_sections(sections, Self::draw_question);
    }

    /// Draw the answer key for the same sections. Numbers match the paper
    /// laid out from the same groups.
    pub fn draw_answer_sections(&mut self, sections: &SectionGroups<'_>) {
        self.walk_sections(sections, Self::draw_answer);
    }

    fn walk_sections(&mut self, sections: &SectionGroups<'_>, draw: fn(&mut Self, &Question)) {
        let s = self.styles;
        let (width, _) = self.renderer.page_size();

        for (label, questions) in sections {
            self.renderer.set_font_size(s.section_size);
            self.renderer.text(
                &format!("Section - {label}"),
                width / 2.0,
                self.y,
                Align::Center,
            );
            self.y += s.section_header_gap;

            self.renderer.set_font_size(s.body_size);
            for question in questions {
                draw(self, question);
            }
            self.y += s.section_gap;
        }
    }

    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            questions: self.question_no - 1,
            pages: self.renderer.page_count(),
            overflows: self.overflows,
        }
    }

    fn draw_question(&mut self, question: &Question) {
        let s = self.styles;
        let (width, _) = self.renderer.page_size();

        let stem = format!("{}. {}", self.question_no, clean_question_text(&question.text));
        self.draw_unit(&stem, s.margin_left, s.content_width(width));

        match question.kind {
            QuestionKind::Mcq => {
                for (letter, option) in ('A'..='Z').zip(question.printable_options()) {
                    self.draw_unit(
                        &format!("({letter}) {option}"),
                        s.option_indent,
                        s.option_width(width),
                    );
                }
            }
            QuestionKind::Diagram => {
                self.draw_unit(DIAGRAM_PLACEHOLDER, s.option_indent, s.option_width(width));
            }
            QuestionKind::Paragraph | QuestionKind::Other(_) => {}
        }

        self.y += s.question_gap;
        self.question_no += 1;
    }

    /// Stem, then `Answer: ...`. A bare option letter on an MCQ is expanded
    /// to that option's text. Questions without an answer keep their number
    /// and print the stem only.
    fn draw_answer(&mut self, question: &Question) {
        let s = self.styles;
        let (width, _) = self.renderer.page_size();

        let stem = format!("{}. {}", self.question_no, clean_question_text(&question.text));
        self.draw_unit(&stem, s.margin_left, s.content_width(width));

        let answer = question.answer.trim();
        if !answer.is_empty() {
            let line = match (&question.kind, option_for_letter(question, answer)) {
                (QuestionKind::Mcq, Some((letter, option))) => {
                    format!("Answer: ({letter}) {option}")
                }
                _ => format!("Answer: {answer}"),
            };
            self.draw_unit(&line, s.option_indent, s.option_width(width));
        }

        self.y += s.question_gap;
        self.question_no += 1;
    }

    /// Wrap one overflow unit, break the page if it does not fit, then draw
    /// its lines contiguously.
    fn draw_unit(&mut self, text: &str, x: f32, max_width: f32) {
        let s = self.styles;
        let (_, height) = self.renderer.page_size();

        let lines = self.renderer.split_text_to_size(text, max_width);
        let block_height = lines.len() as f32 * s.line_height;

        let bottom = s.bottom_limit(height);
        if self.y + block_height > bottom {
            self.renderer.add_page();
            self.y = s.margin_top;
            tracing::debug!(
                page = self.renderer.page_count(),
                question = self.question_no,
                "page break"
            );
        }

        if self.y + block_height > bottom {
            self.overflows += 1;
            tracing::warn!(
                page = self.renderer.page_count(),
                question = self.question_no,
                lines = lines.len(),
                "question does not fit on one page, text runs past the bottom margin"
            );
        }

        for line in &lines {
            self.renderer.text(line, x, self.y, Align::Left);
            self.y += s.line_height;
        }
    }
}

/// The option an answer like `b` or `(B)` refers to, with its letter.
fn option_for_letter<'q>(question: &'q Question, answer: &str) -> Option<(char, &'q str)> {
    let mut chars = answer.trim_matches(|c| c == '(' || c == ')').chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    ('A'..='Z')
        .zip(question.printable_options())
        .find(|(l, _)| *l == letter)
}
