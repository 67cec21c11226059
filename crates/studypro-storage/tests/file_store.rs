use studypro_core::models::question::Question;
use studypro_core::store::QuestionStore;
use studypro_storage::error::StorageError;
use studypro_storage::objects::{FileStore, KeyValueStore};
use studypro_storage::state::{load_questions, save_questions};
use studypro_storage::stats::StatsTracker;

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("state.json"));
    assert_eq!(store.get("anything").unwrap(), None);
}

#[test]
fn values_survive_a_new_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let mut store = FileStore::new(&path);
    store.set("papersGenerated", "4").unwrap();
    store.set("theme", "dark").unwrap();
    store.remove("theme").unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("papersGenerated").unwrap().as_deref(), Some("4"));
    assert_eq!(reopened.get("theme").unwrap(), None);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn two_handles_to_one_file_do_not_clobber_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut questions_handle = FileStore::new(&path);
    let mut questions = QuestionStore::new();
    questions
        .add(Question::paragraph("Explain opportunity cost", "Economics"))
        .unwrap();
    save_questions(&mut questions_handle, &questions).unwrap();

    let mut tracker = StatsTracker::load(FileStore::new(&path)).unwrap();
    tracker.record_questions(1).unwrap();

    let reloaded = load_questions(&FileStore::new(&path)).unwrap();
    assert_eq!(reloaded, questions);
    assert_eq!(
        StatsTracker::load(FileStore::new(&path)).unwrap().stats().questions_added,
        1
    );
}

#[test]
fn non_object_file_is_reported_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let err = FileStore::new(&path).get("questions").unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
}

#[test]
fn unreadable_saved_questions_start_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("state.json"));
    store.set("questions", "definitely not json").unwrap();

    assert!(load_questions(&store).unwrap().is_empty());
}
