use serde::{Serialize, de::DeserializeOwned};

use studypro_core::storage_keys;
use studypro_core::store::QuestionStore;

use crate::error::StorageError;
use crate::objects::KeyValueStore;

/// Load a JSON value stored under `key`. Returns `None` if the key is unset.
pub fn load_state<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Save a value as JSON under `key`.
pub fn save_state<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Load the persisted question store, or an empty one if none was saved.
///
/// An unreadable value is logged and treated as empty; it never blocks
/// startup.
pub fn load_questions(store: &impl KeyValueStore) -> Result<QuestionStore, StorageError> {
    match load_state::<QuestionStore>(store, storage_keys::QUESTIONS) {
        Ok(Some(questions)) => {
            tracing::debug!(count = questions.len(), "questions loaded");
            Ok(questions)
        }
        Ok(None) => {
            tracing::debug!("no saved questions, starting fresh");
            Ok(QuestionStore::new())
        }
        Err(StorageError::Serialization(e)) => {
            tracing::warn!(error = %e, "saved questions are unreadable, starting fresh");
            Ok(QuestionStore::new())
        }
        Err(e) => Err(e),
    }
}

pub fn save_questions(
    store: &mut impl KeyValueStore,
    questions: &QuestionStore,
) -> Result<(), StorageError> {
    save_state(store, storage_keys::QUESTIONS, questions)?;
    tracing::debug!(count = questions.len(), "questions saved");
    Ok(())
}
