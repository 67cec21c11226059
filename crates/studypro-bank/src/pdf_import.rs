//! Picking question text out of a PDF.
//!
//! A PDF is reduced to numbered pages of plain text. The caller shows a page,
//! the user picks a line range, and the selection becomes a paragraph
//! question.

use std::ops::RangeInclusive;

use studypro_core::error::CoreError;
use studypro_core::models::question::Question;
use studypro_core::normalize::NormalizeContext;

use crate::error::BankError;

const PAGE_BREAK: char = '\x0C';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// 1-based.
    pub number: usize,
    pub text: String,
}

impl PdfPage {
    /// Non-blank lines, trimmed. Line ranges index into this list.
    pub fn lines(&self) -> Vec<&str> {
        self.text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

pub fn extract_pages(bytes: &[u8]) -> Result<Vec<PdfPage>, BankError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| BankError::Pdf(e.to_string()))?;
    let pages = split_pages(&text);
    tracing::info!(pages = pages.len(), "PDF text extracted");
    Ok(pages)
}

/// Split extracted text on form feeds. A trailing form feed does not start
/// another page.
pub fn split_pages(text: &str) -> Vec<PdfPage> {
    let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
    text.split(PAGE_BREAK)
        .enumerate()
        .map(|(i, page)| PdfPage {
            number: i + 1,
            text: page.to_string(),
        })
        .collect()
}

/// Find a page by its 1-based number.
pub fn page(pages: &[PdfPage], number: usize) -> Result<&PdfPage, BankError> {
    pages
        .iter()
        .find(|p| p.number == number)
        .ok_or(BankError::PageOutOfRange {
            page: number,
            pages: pages.len(),
        })
}

/// Join a 1-based, inclusive range of the page's lines.
pub fn select_lines(page: &PdfPage, range: RangeInclusive<usize>) -> Result<String, BankError> {
    let lines = page.lines();
    let (start, end) = (*range.start(), *range.end());
    if start == 0 || start > end || end > lines.len() {
        return Err(BankError::LineRange {
            start,
            end,
            lines: lines.len(),
        });
    }
    Ok(lines[start - 1..end].join(" "))
}

/// Build a paragraph question from selected text. Whitespace runs collapse
/// to single spaces; an empty selection is rejected.
pub fn question_from_selection(
    selection: &str,
    ctx: &NormalizeContext,
) -> Result<Question, CoreError> {
    let text = selection.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(CoreError::EmptyText);
    }
    Ok(Question::paragraph(text, ctx.current_subject.trim()))
}
