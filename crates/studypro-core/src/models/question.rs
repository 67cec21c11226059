use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{MAX_OPTIONS, defaults, kind};

/// A canonical question record.
///
/// Serialized field names match the CSV headers, so a serialized question
/// can be fed back through the normalizer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    /// Only populated for [`QuestionKind::Mcq`].
    #[serde(default)]
    pub options: Vec<String>,
    pub rarity: String,
    pub section: String,
    pub subject: String,
    /// Expected answer, printed only on the answer key. For an MCQ this is
    /// usually the option letter.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub answer: String,
}

impl Question {
    /// A paragraph question with default rarity and section.
    pub fn paragraph(text: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::Paragraph,
            options: Vec::new(),
            rarity: defaults::RARITY.to_string(),
            section: defaults::SECTION.to_string(),
            subject: subject.into(),
            answer: String::new(),
        }
    }

    /// Options as printed: trimmed, empty entries dropped, at most four.
    pub fn printable_options(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .take(MAX_OPTIONS)
    }
}

/// The kind of a question. Unknown kinds are kept verbatim (lowercased) so
/// records written by newer versions survive a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    Mcq,
    #[default]
    Paragraph,
    Diagram,
    Other(String),
}

impl QuestionKind {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionKind::Mcq => kind::MCQ,
            QuestionKind::Paragraph => kind::PARAGRAPH,
            QuestionKind::Diagram => kind::DIAGRAM,
            QuestionKind::Other(s) => s,
        }
    }

    /// Human-facing label, e.g. `MCQ` or `Paragraph`.
    pub fn label(&self) -> String {
        match self {
            QuestionKind::Mcq => "MCQ".to_string(),
            other => {
                let mut chars = other.as_str().chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl From<&str> for QuestionKind {
    fn from(value: &str) -> Self {
        let lowered = value.trim().to_lowercase();
        match lowered.as_str() {
            "" | kind::PARAGRAPH => QuestionKind::Paragraph,
            kind::MCQ => QuestionKind::Mcq,
            kind::DIAGRAM => QuestionKind::Diagram,
            _ => QuestionKind::Other(lowered),
        }
    }
}

impl From<String> for QuestionKind {
    fn from(value: String) -> Self {
        QuestionKind::from(value.as_str())
    }
}

impl From<QuestionKind> for String {
    fn from(value: QuestionKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question held by the store, addressable by a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: Uuid,
    #[serde(flatten)]
    pub question: Question,
}
