//! Record normalizer.
//!
//! Turns a loosely-typed record (manual form, CSV row, remote row, or a
//! previously serialized [`Question`]) into a canonical [`Question`]. The
//! transform is pure and idempotent: normalizing its own output yields the
//! same record.

use serde_json::{Map, Value};

use crate::models::question::{Question, QuestionKind};
use crate::schema::{OPTION_DELIMITER, defaults, field};

/// A raw record: field name → arbitrary JSON value.
pub type RawRecord = Map<String, Value>;

/// Ambient inputs to normalization.
#[derive(Debug, Clone, Default)]
pub struct NormalizeContext {
    /// Subject applied when a record does not name one.
    pub current_subject: String,
}

impl NormalizeContext {
    pub fn new(current_subject: impl Into<String>) -> Self {
        Self {
            current_subject: current_subject.into(),
        }
    }
}

/// Normalize a raw record into a canonical question.
///
/// Missing text becomes an empty string; callers that accept questions into
/// the store reject it there. Options are kept only for MCQs, trimmed but
/// otherwise untouched; empty entries are dropped when printing.
pub fn normalize(raw: &RawRecord, ctx: &NormalizeContext) -> Question {
    let text = string_field(raw, &[field::QUESTION, field::TEXT_ALIAS])
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let kind = string_field(raw, &[field::TYPE, field::KIND_ALIAS])
        .map(QuestionKind::from)
        .unwrap_or_default();

    let options = if kind == QuestionKind::Mcq {
        raw.get(field::OPTIONS).map(option_list).unwrap_or_default()
    } else {
        Vec::new()
    };

    let rarity = string_field(raw, &[field::RARITY])
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| defaults::RARITY.to_string());

    let section = string_field(raw, &[field::SECTION])
        .map(|s| section_label(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| defaults::SECTION.to_string());

    let subject = string_field(raw, &[field::SUBJECT])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ctx.current_subject.trim().to_string());

    let answer = string_field(raw, &[field::ANSWER, field::ANSWER_ALIAS])
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    Question {
        text,
        kind,
        options,
        rarity,
        section,
        subject,
        answer,
    }
}

/// Normalize an already-typed question by round-tripping it through its raw
/// form.
pub fn normalize_question(question: &Question, ctx: &NormalizeContext) -> Question {
    match serde_json::to_value(question) {
        Ok(Value::Object(raw)) => normalize(&raw, ctx),
        _ => question.clone(),
    }
}

/// Title-case a subject identifier, e.g. `economics` → `Economics`.
pub fn title_case(identifier: &str) -> String {
    identifier
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First present, non-null field among `names`, rendered as a string.
fn string_field(raw: &RawRecord, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match raw.get(*name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Options from a delimited string or an array. A list with no non-blank
/// entry is empty, so `[""]` and `""` normalize alike.
fn option_list(value: &Value) -> Vec<String> {
    let options: Vec<String> = match value {
        Value::String(s) => s
            .split(OPTION_DELIMITER)
            .map(|o| o.trim().to_string())
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    if options.iter().all(String::is_empty) {
        Vec::new()
    } else {
        options
    }
}

/// Uppercase section label, accepting `B`, `b`, `Section B` and `section_b`.
fn section_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let bare = match trimmed.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("section") => {
            trimmed[7..].trim_start_matches([' ', '_', '-'])
        }
        _ => trimmed,
    };
    bare.trim().to_uppercase()
}
