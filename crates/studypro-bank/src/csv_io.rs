//! CSV import and export.
//!
//! Import is forgiving: header names are trimmed and lowercased, a UTF-8 BOM
//! is ignored, missing optional columns take their defaults, and a bad row
//! is reported and skipped rather than failing the file. Export writes what
//! spreadsheet tools expect: a BOM, every field quoted, CRLF line endings.

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde_json::Value;

use studypro_core::models::question::Question;
use studypro_core::normalize::{NormalizeContext, RawRecord, normalize};
use studypro_core::schema::{CSV_HEADERS, OPTION_DELIMITER, field};

use crate::error::BankError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file; the header is line 1.
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub questions: Vec<Question>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.questions.len()
    }
}

/// Parse CSV bytes into normalized questions. Rows without question text are
/// skipped; `ctx` supplies the subject for rows that do not name one.
pub fn import_csv(bytes: &[u8], ctx: &NormalizeContext) -> Result<ImportReport, BankError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    if !headers
        .iter()
        .any(|h| h == field::QUESTION || h == field::TEXT_ALIAS)
    {
        return Err(BankError::MissingQuestionColumn);
    }

    let mut report = ImportReport::default();
    for (index, result) in reader.records().enumerate() {
        let fallback_line = index as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                tracing::warn!(line, error = %e, "skipping malformed CSV row");
                report.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let line = record.position().map_or(fallback_line, |p| p.line());

        let raw: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), Value::String(value.to_string())))
            .collect();
        let question = normalize(&raw, ctx);

        if question.text.is_empty() {
            tracing::debug!(line, "skipping CSV row without question text");
            report.skipped.push(SkippedRow {
                line,
                reason: "question text is empty".to_string(),
            });
            continue;
        }
        report.questions.push(question);
    }

    tracing::info!(
        imported = report.imported(),
        skipped = report.skipped.len(),
        "CSV import finished"
    );
    Ok(report)
}

/// Serialize questions as CSV with a header row. Options are flattened into
/// one comma-joined column.
pub fn export_csv(questions: &[Question]) -> Result<Vec<u8>, BankError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(CSV_HEADERS)?;
    for q in questions {
        let options = q.options.join(&OPTION_DELIMITER.to_string());
        writer.write_record([
            q.text.as_str(),
            q.kind.as_str(),
            options.as_str(),
            q.rarity.as_str(),
            q.section.as_str(),
            q.subject.as_str(),
            q.answer.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| BankError::Io(e.into_error()))
}
