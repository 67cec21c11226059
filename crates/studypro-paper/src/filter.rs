//! Filter pipeline.
//!
//! Narrows the store to the questions a paper may print: first by rarity,
//! then by the kinds a restricted subject allows. Never mutates its input.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use studypro_core::models::question::{Question, QuestionKind};
use studypro_core::normalize::title_case;

/// The subject that only accepts objective questions out of the box.
pub const RESTRICTED_SUBJECT: &str = "computer";

/// Rarity selection for a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RarityFilter {
    #[default]
    All,
    /// Exact, case-sensitive match against the stored (lowercase) rarity.
    Only(String),
}

impl RarityFilter {
    pub fn admits(&self, question: &Question) -> bool {
        match self {
            RarityFilter::All => true,
            RarityFilter::Only(rarity) => question.rarity == *rarity,
        }
    }
}

impl From<&str> for RarityFilter {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "all" => RarityFilter::All,
            other => RarityFilter::Only(other.to_string()),
        }
    }
}

impl fmt::Display for RarityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RarityFilter::All => f.write_str("all"),
            RarityFilter::Only(rarity) => f.write_str(rarity),
        }
    }
}

/// Subjects that only permit certain question kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectRules {
    rules: BTreeMap<String, Vec<QuestionKind>>,
}

impl Default for SubjectRules {
    /// `computer` papers are MCQ-only.
    fn default() -> Self {
        Self::none().restrict(RESTRICTED_SUBJECT, vec![QuestionKind::Mcq])
    }
}

impl SubjectRules {
    /// No subject is restricted.
    pub fn none() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn restrict(mut self, subject: &str, allowed: Vec<QuestionKind>) -> Self {
        self.rules.insert(subject.trim().to_lowercase(), allowed);
        self
    }

    /// Kinds allowed for `subject`, or `None` if it is unrestricted.
    /// Matching ignores case and surrounding whitespace.
    pub fn allowed_kinds(&self, subject: &str) -> Option<&[QuestionKind]> {
        let subject = subject.trim();
        self.rules
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(subject))
            .map(|(_, kinds)| kinds.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no {kinds} questions available for {subject} subject", kinds = kind_labels(.allowed))]
    NoMatchingKind {
        subject: String,
        allowed: Vec<QuestionKind>,
    },
}

fn kind_labels(kinds: &[QuestionKind]) -> String {
    kinds
        .iter()
        .map(QuestionKind::label)
        .collect::<Vec<_>>()
        .join("/")
}

/// Select the questions a paper for `subject_hint` may print.
///
/// Rarity is applied first. If the subject is restricted, only allowed
/// kinds are kept and an empty result is a [`Rejection`], so generation
/// stops before anything is drawn.
pub fn filter_questions<'a>(
    questions: &'a [Question],
    rarity: &RarityFilter,
    subject_hint: &str,
    rules: &SubjectRules,
) -> Result<Vec<&'a Question>, Rejection> {
    let mut selected: Vec<&Question> = questions.iter().filter(|q| rarity.admits(q)).collect();

    if let Some(allowed) = rules.allowed_kinds(subject_hint) {
        selected.retain(|q| allowed.contains(&q.kind));
        if selected.is_empty() {
            return Err(Rejection::NoMatchingKind {
                subject: title_case(subject_hint),
                allowed: allowed.to_vec(),
            });
        }
    }

    Ok(selected)
}
