//! Paper generation: filter, group, load the font, lay out, save. The answer
//! key runs the same selection so its numbering matches the paper.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use studypro_core::models::question::Question;

use crate::error::PaperError;
use crate::filter::{RarityFilter, SubjectRules, filter_questions};
use crate::font::FontSource;
use crate::group::{SectionGroups, group_by_section};
use crate::layout::{LayoutEngine, PaperHeader};
use crate::render::DocumentRenderer;
use crate::styles::PaperStyles;

/// Subject used when the request leaves it blank.
pub const DEFAULT_SUBJECT: &str = "Class12";

const FILENAME_SUFFIX: &str = "paper";
const ANSWER_KEY_FILENAME_SUFFIX: &str = "answer_key";

/// Header content and defaults that are not per-paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperDefaults {
    pub title: String,
    pub total_marks: u32,
    pub duration: String,
    pub instructions: Vec<String>,
}

impl Default for PaperDefaults {
    fn default() -> Self {
        Self {
            title: "Question Paper".to_string(),
            total_marks: 100,
            duration: "3 hours".to_string(),
            instructions: vec![
                "General Instructions:".to_string(),
                "1. Read all questions carefully before attempting.".to_string(),
                "2. All questions are compulsory.".to_string(),
                "3. Write your answers clearly and legibly.".to_string(),
            ],
        }
    }
}

/// Everything one paper needs besides the questions themselves.
#[derive(Debug, Clone)]
pub struct PaperRequest {
    pub subject: String,
    pub rarity: RarityFilter,
    pub title: String,
    pub total_marks: u32,
    pub duration: String,
    pub date: Date,
    pub instructions: Vec<String>,
}

impl PaperRequest {
    pub fn new(subject: impl Into<String>, date: Date, defaults: &PaperDefaults) -> Self {
        Self {
            subject: subject.into(),
            rarity: RarityFilter::All,
            title: defaults.title.clone(),
            total_marks: defaults.total_marks,
            duration: defaults.duration.clone(),
            date,
            instructions: defaults.instructions.clone(),
        }
    }

    /// The trimmed subject, or [`DEFAULT_SUBJECT`] if blank.
    pub fn subject_or_default(&self) -> &str {
        match self.subject.trim() {
            "" => DEFAULT_SUBJECT,
            subject => subject,
        }
    }

    pub fn header(&self) -> PaperHeader {
        PaperHeader {
            title: self.title.clone(),
            subject: self.subject_or_default().to_string(),
            date: self.date.strftime("%d/%m/%Y").to_string(),
            duration: self.duration.clone(),
            total_marks: self.total_marks,
            instructions: self.instructions.clone(),
        }
    }
}

/// `Computer Science` becomes `Computer_Science_paper.pdf`.
pub fn paper_filename(subject: &str) -> String {
    suffixed_filename(subject, FILENAME_SUFFIX)
}

/// `Computer Science` becomes `Computer_Science_answer_key.pdf`.
pub fn answer_key_filename(subject: &str) -> String {
    suffixed_filename(subject, ANSWER_KEY_FILENAME_SUFFIX)
}

fn suffixed_filename(subject: &str, suffix: &str) -> String {
    let stem = subject.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_{suffix}.pdf")
}

#[derive(Debug, Clone)]
pub struct GeneratedPaper<O> {
    pub output: O,
    pub filename: String,
    pub questions: usize,
    pub pages: usize,
    /// Questions that ran past the bottom of a page.
    pub overflows: usize,
}

/// Which document a layout pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Document {
    Paper,
    AnswerKey,
}

/// Generate a paper from `questions`.
///
/// Validation and filtering happen before the renderer is touched, so a
/// rejected request draws nothing. The font is resolved before layout
/// starts; a font failure falls back to the renderer's built-in font.
pub fn generate_paper<R: DocumentRenderer>(
    questions: &[Question],
    request: &PaperRequest,
    rules: &SubjectRules,
    styles: &PaperStyles,
    font: &dyn FontSource,
    renderer: R,
) -> Result<GeneratedPaper<R::Output>, PaperError> {
    let sections = select(questions, request, rules)?;
    render(Document::Paper, &sections, request, styles, font, renderer)
}

/// Generate the answer key for the paper the same arguments produce.
///
/// Selection, rejection and numbering are identical to [`generate_paper`].
pub fn generate_answer_key<R: DocumentRenderer>(
    questions: &[Question],
    request: &PaperRequest,
    rules: &SubjectRules,
    styles: &PaperStyles,
    font: &dyn FontSource,
    renderer: R,
) -> Result<GeneratedPaper<R::Output>, PaperError> {
    let sections = select(questions, request, rules)?;
    render(Document::AnswerKey, &sections, request, styles, font, renderer)
}

fn select<'q>(
    questions: &'q [Question],
    request: &PaperRequest,
    rules: &SubjectRules,
) -> Result<SectionGroups<'q>, PaperError> {
    if questions.is_empty() {
        return Err(PaperError::NoQuestions);
    }

    let selected = filter_questions(questions, &request.rarity, request.subject_or_default(), rules)?;
    Ok(group_by_section(selected.iter().copied()))
}

fn render<R: DocumentRenderer>(
    document: Document,
    sections: &SectionGroups<'_>,
    request: &PaperRequest,
    styles: &PaperStyles,
    font: &dyn FontSource,
    mut renderer: R,
) -> Result<GeneratedPaper<R::Output>, PaperError> {
    match font.load().and_then(|bytes| renderer.embed_font(&bytes)) {
        Ok(()) => tracing::debug!("custom font embedded"),
        Err(e) => tracing::warn!(error = %e, "font unavailable, using built-in font"),
    }

    let header = request.header();
    let mut engine = LayoutEngine::new(&mut renderer, styles);
    match document {
        Document::Paper => {
            engine.draw_header(&header);
            engine.draw_sections(sections);
        }
        Document::AnswerKey => {
            engine.draw_answer_key_header(&header);
            engine.draw_answer_sections(sections);
        }
    }
    let summary = engine.summary();

    let subject = request.subject_or_default();
    let filename = match document {
        Document::Paper => paper_filename(subject),
        Document::AnswerKey => answer_key_filename(subject),
    };
    let output = renderer.save(&filename)?;

    tracing::info!(
        subject,
        document = ?document,
        rarity = %request.rarity,
        questions = summary.questions,
        sections = sections.len(),
        pages = summary.pages,
        overflows = summary.overflows,
        filename = %filename,
        "document generated"
    );

    Ok(GeneratedPaper {
        output,
        filename,
        questions: summary.questions,
        pages: summary.pages,
        overflows: summary.overflows,
    })
}
