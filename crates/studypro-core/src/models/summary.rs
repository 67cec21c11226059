use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::question::Question;

/// Preview counts over a set of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub total: usize,
    pub by_subject: BTreeMap<String, usize>,
    pub by_kind: BTreeMap<String, usize>,
    pub by_rarity: BTreeMap<String, usize>,
    pub by_section: BTreeMap<String, usize>,
}

impl QuestionSummary {
    pub fn from_questions<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Self {
        let mut summary = Self::default();
        for q in questions {
            summary.total += 1;
            *summary.by_subject.entry(q.subject.clone()).or_default() += 1;
            *summary.by_kind.entry(q.kind.to_string()).or_default() += 1;
            *summary.by_rarity.entry(q.rarity.clone()).or_default() += 1;
            *summary.by_section.entry(q.section.clone()).or_default() += 1;
        }
        summary
    }

    /// Number of MCQ questions, the only kind a restricted subject accepts
    /// by default.
    pub fn mcq_count(&self) -> usize {
        self.by_kind.get(crate::schema::kind::MCQ).copied().unwrap_or(0)
    }
}
