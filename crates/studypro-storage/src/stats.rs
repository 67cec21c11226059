//! Stats tracker.
//!
//! Owns the [`Stats`] entity for a session and writes all four persisted
//! values after every mutation. Counters are stored as decimal strings,
//! timelines as JSON arrays.

use jiff::civil::Date;

use studypro_core::models::stats::{Stats, TimelinePoint};
use studypro_core::storage_keys;

use crate::error::StorageError;
use crate::objects::KeyValueStore;

pub struct StatsTracker<S: KeyValueStore> {
    store: S,
    stats: Stats,
}

impl<S: KeyValueStore> StatsTracker<S> {
    /// Load persisted stats. Missing or unreadable values start at zero.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let stats = Stats {
            papers_generated: read_counter(&store, storage_keys::PAPERS_GENERATED)?,
            questions_added: read_counter(&store, storage_keys::QUESTIONS_ADDED)?,
            papers_timeline: read_timeline(&store, storage_keys::PAPERS_TIMELINE)?,
            questions_timeline: read_timeline(&store, storage_keys::QUESTIONS_TIMELINE)?,
        };
        Ok(Self { store, stats })
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Record one generated paper against today's local date.
    pub fn record_paper(&mut self) -> Result<&Stats, StorageError> {
        self.record_paper_on(today())
    }

    pub fn record_paper_on(&mut self, date: Date) -> Result<&Stats, StorageError> {
        self.stats.record_paper_on(date);
        self.persist()?;
        tracing::info!(total = self.stats.papers_generated, "paper generation recorded");
        Ok(&self.stats)
    }

    /// Record `n` added questions against today's local date. `n == 0` is a
    /// no-op.
    pub fn record_questions(&mut self, n: u64) -> Result<&Stats, StorageError> {
        self.record_questions_on(n, today())
    }

    pub fn record_questions_on(&mut self, n: u64, date: Date) -> Result<&Stats, StorageError> {
        if n == 0 {
            return Ok(&self.stats);
        }
        self.stats.record_questions_on(n, date);
        self.persist()?;
        tracing::info!(added = n, total = self.stats.questions_added, "questions recorded");
        Ok(&self.stats)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.store.set(
            storage_keys::PAPERS_GENERATED,
            &self.stats.papers_generated.to_string(),
        )?;
        self.store.set(
            storage_keys::QUESTIONS_ADDED,
            &self.stats.questions_added.to_string(),
        )?;
        self.store.set(
            storage_keys::PAPERS_TIMELINE,
            &serde_json::to_string(&self.stats.papers_timeline)?,
        )?;
        self.store.set(
            storage_keys::QUESTIONS_TIMELINE,
            &serde_json::to_string(&self.stats.questions_timeline)?,
        )?;
        tracing::debug!("stats persisted");
        Ok(())
    }
}

fn today() -> Date {
    jiff::Zoned::now().date()
}

fn read_counter(store: &impl KeyValueStore, key: &str) -> Result<u64, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(0);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "unreadable counter, starting at zero");
            Ok(0)
        }
    }
}

fn read_timeline(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Vec<TimelinePoint>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(points) => Ok(points),
        Err(e) => {
            tracing::warn!(key, error = %e, "unreadable timeline, starting empty");
            Ok(Vec::new())
        }
    }
}
