use jiff::civil::date;
use studypro_core::storage_keys;
use studypro_storage::objects::{KeyValueStore, MemoryStore};
use studypro_storage::stats::StatsTracker;

#[test]
fn fresh_store_starts_at_zero() {
    let tracker = StatsTracker::load(MemoryStore::new()).unwrap();
    assert_eq!(tracker.stats().papers_generated, 0);
    assert!(tracker.stats().questions_timeline.is_empty());
}

#[test]
fn record_questions_twice_same_day_yields_one_point() {
    let mut tracker = StatsTracker::load(MemoryStore::new()).unwrap();
    let today = date(2026, 10, 19);

    tracker.record_questions_on(3, today).unwrap();
    let stats = tracker.record_questions_on(3, today).unwrap();

    assert_eq!(stats.questions_added, 6);
    assert_eq!(stats.questions_timeline.len(), 1);
    assert_eq!(stats.questions_timeline[0].count, 6);
}

#[test]
fn every_mutation_persists_all_four_values() {
    let mut tracker = StatsTracker::load(MemoryStore::new()).unwrap();
    tracker.record_paper_on(date(2026, 10, 19)).unwrap();

    let store = tracker.store();
    assert_eq!(
        store.get(storage_keys::PAPERS_GENERATED).unwrap().as_deref(),
        Some("1")
    );
    assert_eq!(
        store.get(storage_keys::QUESTIONS_ADDED).unwrap().as_deref(),
        Some("0")
    );
    assert_eq!(
        store.get(storage_keys::PAPERS_TIMELINE).unwrap().as_deref(),
        Some(r#"[{"date":"2026-10-19","count":1}]"#)
    );
    assert_eq!(
        store.get(storage_keys::QUESTIONS_TIMELINE).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn reloading_restores_counters_and_timelines() {
    let mut tracker = StatsTracker::load(MemoryStore::new()).unwrap();
    tracker.record_paper_on(date(2026, 10, 18)).unwrap();
    tracker.record_questions_on(5, date(2026, 10, 19)).unwrap();
    let before = tracker.stats().clone();

    let reloaded = StatsTracker::load(tracker.into_store()).unwrap();
    assert_eq!(reloaded.stats(), &before);
}

#[test]
fn recording_zero_questions_writes_nothing() {
    let mut tracker = StatsTracker::load(MemoryStore::new()).unwrap();
    tracker.record_questions_on(0, date(2026, 10, 19)).unwrap();
    assert_eq!(tracker.store().keys().count(), 0);
}

#[test]
fn unreadable_values_fall_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.set(storage_keys::PAPERS_GENERATED, "lots").unwrap();
    store.set(storage_keys::QUESTIONS_ADDED, "7").unwrap();
    store.set(storage_keys::PAPERS_TIMELINE, "{not json").unwrap();

    let tracker = StatsTracker::load(store).unwrap();
    assert_eq!(tracker.stats().papers_generated, 0);
    assert_eq!(tracker.stats().questions_added, 7);
    assert!(tracker.stats().papers_timeline.is_empty());
}

#[test]
fn counters_never_decrease_across_days() {
    let mut tracker = StatsTracker::load(MemoryStore::new()).unwrap();
    let mut last = 0;
    for day in 1..=5 {
        let stats = tracker.record_questions_on(day, date(2026, 10, day as i8)).unwrap();
        assert!(stats.questions_added > last);
        last = stats.questions_added;
    }
    assert_eq!(tracker.stats().questions_timeline.len(), 5);
}
