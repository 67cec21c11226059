mod common;

use std::path::PathBuf;

use common::{Op, RecordingRenderer, mcq, question};
use jiff::civil::date;
use studypro_core::models::question::QuestionKind;
use studypro_paper::error::PaperError;
use studypro_paper::filter::{RarityFilter, Rejection, SubjectRules};
use studypro_paper::font::{FileFont, FontSource, NoFont};
use studypro_paper::generate::{
    PaperDefaults, PaperRequest, answer_key_filename, generate_answer_key, generate_paper,
    paper_filename,
};
use studypro_paper::pdf::PdfRenderer;
use studypro_paper::render::{Align, DocumentRenderer};
use studypro_paper::styles::PaperStyles;

/// Fails the test if generation touches the renderer at all.
struct UntouchableRenderer;

impl DocumentRenderer for UntouchableRenderer {
    type Output = ();

    fn page_size(&self) -> (f32, f32) {
        panic!("renderer used")
    }
    fn embed_font(&mut self, _bytes: &[u8]) -> Result<(), PaperError> {
        panic!("renderer used")
    }
    fn set_font_size(&mut self, _size: f32) {
        panic!("renderer used")
    }
    fn split_text_to_size(&self, _text: &str, _max_width: f32) -> Vec<String> {
        panic!("renderer used")
    }
    fn text(&mut self, _text: &str, _x: f32, _y: f32, _align: Align) {
        panic!("renderer used")
    }
    fn line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _thickness: f32) {
        panic!("renderer used")
    }
    fn add_page(&mut self) {
        panic!("renderer used")
    }
    fn page_count(&self) -> usize {
        panic!("renderer used")
    }
    fn save(self, _filename: &str) -> Result<(), PaperError> {
        panic!("renderer used")
    }
}

struct BytesFont;

impl FontSource for BytesFont {
    fn load(&self) -> Result<Vec<u8>, PaperError> {
        Ok(vec![0, 1, 0, 0])
    }
}

fn request(subject: &str) -> PaperRequest {
    PaperRequest::new(subject, date(2026, 10, 19), &PaperDefaults::default())
}

#[test]
fn computer_without_mcqs_rejects_before_any_drawing() {
    let questions = vec![
        question("Explain recursion", QuestionKind::Paragraph, "A"),
        question("Draw a flowchart", QuestionKind::Diagram, "B"),
    ];

    let err = generate_paper(
        &questions,
        &request("Computer"),
        &SubjectRules::default(),
        &PaperStyles::default(),
        &BytesFont,
        UntouchableRenderer,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        PaperError::Rejected(Rejection::NoMatchingKind { .. })
    ));
    assert_eq!(err.to_string(), "no MCQ questions available for Computer subject");
}

#[test]
fn answer_key_is_rejected_like_the_paper() {
    let questions = vec![question("Explain recursion", QuestionKind::Paragraph, "A")];

    let err = generate_answer_key(
        &questions,
        &request("Computer"),
        &SubjectRules::default(),
        &PaperStyles::default(),
        &NoFont,
        UntouchableRenderer,
    )
    .unwrap_err();

    assert!(matches!(err, PaperError::Rejected(_)));
}

#[test]
fn answer_key_follows_the_paper_selection() {
    let mut loop_question = mcq("Which is a loop?", &["for", "if"]);
    loop_question.answer = "A".to_string();
    let questions = vec![
        question("Explain recursion", QuestionKind::Paragraph, "A"),
        loop_question,
    ];

    let key = generate_answer_key(
        &questions,
        &request("Computer Science"),
        &SubjectRules::default().restrict("computer science", vec![QuestionKind::Mcq]),
        &PaperStyles::default(),
        &NoFont,
        RecordingRenderer::a4(),
    )
    .unwrap();

    assert_eq!(key.questions, 1);
    assert_eq!(key.overflows, 0);
    assert_eq!(key.filename, "Computer_Science_answer_key.pdf");
    let texts: Vec<_> = key
        .output
        .iter()
        .filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"1. Which is a loop?"));
    assert!(texts.contains(&"Answer: (A) for"));
    assert!(!texts.iter().any(|t| t.contains("recursion")));
}

#[test]
fn empty_store_is_a_validation_error() {
    let err = generate_paper(
        &[],
        &request("Science"),
        &SubjectRules::default(),
        &PaperStyles::default(),
        &NoFont,
        UntouchableRenderer,
    )
    .unwrap_err();
    assert!(matches!(err, PaperError::NoQuestions));
}

#[test]
fn computer_paper_prints_only_mcqs() {
    let questions = vec![
        question("Explain recursion", QuestionKind::Paragraph, "A"),
        mcq("Which is a loop?", &["for", "if"]),
    ];

    let paper = generate_paper(
        &questions,
        &request("computer"),
        &SubjectRules::default(),
        &PaperStyles::default(),
        &NoFont,
        RecordingRenderer::a4(),
    )
    .unwrap();

    assert_eq!(paper.questions, 1);
    assert_eq!(paper.filename, "computer_paper.pdf");
    let texts: Vec<_> = paper
        .output
        .iter()
        .filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"1. Which is a loop?"));
    assert!(!texts.iter().any(|t| t.contains("recursion")));
}

#[test]
fn font_is_embedded_before_any_text() {
    let questions = vec![question("Define work", QuestionKind::Paragraph, "A")];

    let paper = generate_paper(
        &questions,
        &request("Physics"),
        &SubjectRules::default(),
        &PaperStyles::default(),
        &BytesFont,
        RecordingRenderer::a4(),
    )
    .unwrap();

    assert_eq!(paper.output.first(), Some(&Op::EmbedFont));
}

#[test]
fn font_failures_fall_back_silently() {
    let questions = vec![question("Define work", QuestionKind::Paragraph, "A")];

    let missing = FileFont(PathBuf::from("/nonexistent/NotoSansGujarati.ttf"));
    assert!(matches!(missing.load(), Err(PaperError::Font(_))));

    for font in [&missing as &dyn FontSource, &NoFont, &BytesFont] {
        let mut renderer = RecordingRenderer::a4();
        renderer.accept_font = false;
        let paper = generate_paper(
            &questions,
            &request("Physics"),
            &SubjectRules::default(),
            &PaperStyles::default(),
            font,
            renderer,
        )
        .unwrap();
        assert_eq!(paper.questions, 1);
        assert!(!paper.output.contains(&Op::EmbedFont));
    }
}

#[test]
fn blank_subject_uses_the_default() {
    let questions = vec![question("Define work", QuestionKind::Paragraph, "A")];

    let paper = generate_paper(
        &questions,
        &request("   "),
        &SubjectRules::default(),
        &PaperStyles::default(),
        &NoFont,
        RecordingRenderer::a4(),
    )
    .unwrap();

    assert_eq!(paper.filename, "Class12_paper.pdf");
    assert!(paper.output.iter().any(|op| matches!(
        op,
        Op::Text { text, .. } if text == "CLASS12"
    )));
}

#[test]
fn no_matching_rarity_yields_a_header_only_paper() {
    let questions = vec![question("Define work", QuestionKind::Paragraph, "A")];
    let mut req = request("Physics");
    req.rarity = RarityFilter::from("rare");

    let paper = generate_paper(
        &questions,
        &req,
        &SubjectRules::default(),
        &PaperStyles::default(),
        &NoFont,
        RecordingRenderer::a4(),
    )
    .unwrap();

    assert_eq!(paper.questions, 0);
    assert_eq!(paper.pages, 1);
}

#[test]
fn header_date_is_day_month_year() {
    let req = PaperRequest::new("Maths", date(2026, 3, 5), &PaperDefaults::default());
    let header = req.header();
    assert_eq!(header.date, "05/03/2026");
    assert_eq!(header.total_marks, 100);
    assert_eq!(header.subject, "Maths");
}

#[test]
fn filenames_replace_whitespace_runs() {
    assert_eq!(paper_filename("Computer Science"), "Computer_Science_paper.pdf");
    assert_eq!(paper_filename("Social \t Studies"), "Social_Studies_paper.pdf");
    assert_eq!(paper_filename("Class12"), "Class12_paper.pdf");
    assert_eq!(answer_key_filename("Home  Science"), "Home_Science_answer_key.pdf");
}

#[test]
fn pdf_renderer_produces_a_pdf() {
    let questions = vec![
        mcq("Which is a noble gas?", &["Neon", "Nitrogen", "Oxygen", "Hydrogen"]),
        question("Draw a cell", QuestionKind::Diagram, "B"),
    ];

    let renderer = PdfRenderer::a4("Question Paper").unwrap();
    let paper = generate_paper(
        &questions,
        &request("Science"),
        &SubjectRules::default(),
        &PaperStyles::default(),
        &NoFont,
        renderer,
    )
    .unwrap();

    assert_eq!(paper.pages, 1);
    assert_eq!(paper.output.filename, "Science_paper.pdf");
    assert!(paper.output.bytes.starts_with(b"%PDF"));
}
