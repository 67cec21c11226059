//! In-memory question store.
//!
//! An ordered sequence of questions. Insertion order is kept for listing
//! and search; rendering groups by section and does not depend on it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::question::{Question, QuestionKind, StoredQuestion};
use crate::models::summary::QuestionSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionStore {
    entries: Vec<StoredQuestion>,
}

/// Criteria for [`QuestionStore::search`] and [`QuestionStore::delete_where`].
/// Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    /// Case-insensitive substring of the question text.
    pub text: Option<String>,
    pub subject: Option<String>,
    pub kind: Option<QuestionKind>,
    pub rarity: Option<String>,
    pub section: Option<String>,
}

impl QuestionQuery {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.subject.is_none()
            && self.kind.is_none()
            && self.rarity.is_none()
            && self.section.is_none()
    }

    pub fn matches(&self, q: &Question) -> bool {
        if let Some(text) = &self.text
            && !q.text.to_lowercase().contains(&text.to_lowercase())
        {
            return false;
        }
        if let Some(subject) = &self.subject
            && !q.subject.eq_ignore_ascii_case(subject.trim())
        {
            return false;
        }
        if let Some(kind) = &self.kind
            && &q.kind != kind
        {
            return false;
        }
        if let Some(rarity) = &self.rarity
            && !q.rarity.eq_ignore_ascii_case(rarity.trim())
        {
            return false;
        }
        if let Some(section) = &self.section
            && !q.section.eq_ignore_ascii_case(section.trim())
        {
            return false;
        }
        true
    }
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StoredQuestion] {
        &self.entries
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.entries.iter().map(|e| &e.question)
    }

    pub fn get(&self, id: Uuid) -> Option<&StoredQuestion> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append a question. Questions with blank text are rejected.
    pub fn add(&mut self, question: Question) -> Result<Uuid, CoreError> {
        let id = Uuid::new_v4();
        self.insert(id, question)?;
        Ok(id)
    }

    /// Append every question with non-blank text, returning how many were
    /// added.
    pub fn extend(&mut self, questions: impl IntoIterator<Item = Question>) -> usize {
        let mut added = 0;
        for question in questions {
            if self.add(question).is_ok() {
                added += 1;
            }
        }
        added
    }

    /// Replace a question: the old entry is removed and the replacement is
    /// appended under the same id.
    pub fn edit(&mut self, id: Uuid, question: Question) -> Result<(), CoreError> {
        if question.text.trim().is_empty() {
            return Err(CoreError::EmptyText);
        }
        self.delete(id)?;
        self.insert(id, question)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<StoredQuestion, CoreError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CoreError::NotFound(id))?;
        Ok(self.entries.remove(pos))
    }

    /// Remove every question matching `query`. An empty query removes
    /// nothing.
    pub fn delete_where(&mut self, query: &QuestionQuery) -> usize {
        if query.is_empty() {
            return 0;
        }
        let before = self.entries.len();
        self.entries.retain(|e| !query.matches(&e.question));
        before - self.entries.len()
    }

    pub fn search(&self, query: &QuestionQuery) -> Vec<&StoredQuestion> {
        self.entries
            .iter()
            .filter(|e| query.matches(&e.question))
            .collect()
    }

    pub fn summary(&self) -> QuestionSummary {
        QuestionSummary::from_questions(self.questions())
    }

    fn insert(&mut self, id: Uuid, question: Question) -> Result<(), CoreError> {
        if question.text.trim().is_empty() {
            return Err(CoreError::EmptyText);
        }
        self.entries.push(StoredQuestion { id, question });
        Ok(())
    }
}
