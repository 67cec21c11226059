use std::path::Path;

use studypro_core::models::question::Question;
use studypro_core::normalize::NormalizeContext;
use studypro_core::store::QuestionStore;
use studypro_storage::objects::{FileStore, KeyValueStore};
use studypro_storage::state::{load_questions, save_questions};
use studypro_storage::stats::StatsTracker;

use crate::config::StudyProConfig;

/// Everything a command works on: the config, the question store, and the
/// usage stats. Loaded once per invocation and passed to each command.
pub struct AppState<S: KeyValueStore + Clone = FileStore> {
    pub config: StudyProConfig,
    pub questions: QuestionStore,
    pub stats: StatsTracker<S>,
    store: S,
}

impl AppState<FileStore> {
    pub fn open(config: StudyProConfig, data_path: &Path) -> eyre::Result<Self> {
        Self::with_store(config, FileStore::new(data_path))
    }
}

impl<S: KeyValueStore + Clone> AppState<S> {
    pub fn with_store(config: StudyProConfig, store: S) -> eyre::Result<Self> {
        let questions = load_questions(&store)?;
        let stats = StatsTracker::load(store.clone())?;
        Ok(Self {
            config,
            questions,
            stats,
            store,
        })
    }

    /// Normalization context with the configured default subject.
    pub fn context(&self) -> NormalizeContext {
        NormalizeContext::new(self.config.default_subject.clone())
    }

    /// Context for an explicit subject, falling back to the default.
    pub fn context_for(&self, subject: Option<&str>) -> NormalizeContext {
        match subject.map(str::trim) {
            Some(s) if !s.is_empty() => NormalizeContext::new(s),
            _ => self.context(),
        }
    }

    pub fn save_questions(&mut self) -> eyre::Result<()> {
        save_questions(&mut self.store, &self.questions)?;
        Ok(())
    }

    /// Append questions, persist the store, and count the additions.
    /// Returns how many were added.
    pub fn add_questions(&mut self, questions: Vec<Question>) -> eyre::Result<usize> {
        let added = self.questions.extend(questions);
        if added > 0 {
            self.save_questions()?;
            self.stats.record_questions(added as u64)?;
        }
        Ok(added)
    }
}
