//! Saved contract snippets
//!
//! The whole collection is persisted as one JSON array under
//! [`SNIPPETS_KEY`](crate::storage::SNIPPETS_KEY). The in-memory list and the
//! stored array are kept identical: a write that fails leaves the in-memory
//! list as it was before the call.

use contract_auditor_sdk::{Language, Snippet};
use std::sync::Arc;
use thiserror::Error;

use crate::storage::{Storage, StorageError, SNIPPETS_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Saved snippets are corrupt and could not be read: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Could not serialize snippets: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct SnippetStore {
    storage: Arc<dyn Storage>,
    snippets: Vec<Snippet>,
}

impl SnippetStore {
    /// Read the stored collection. A missing key is an empty collection.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        let snippets = Self::read(storage.as_ref())?;
        Ok(Self { storage, snippets })
    }

    /// Like [`open`](Self::open), but falls back to an empty collection.
    /// The error that caused the fallback is returned alongside so the caller
    /// can tell the user.
    pub fn open_or_default(storage: Arc<dyn Storage>) -> (Self, Option<StoreError>) {
        match Self::read(storage.as_ref()) {
            Ok(snippets) => (Self { storage, snippets }, None),
            Err(e) => {
                tracing::warn!(error = %e, "starting with an empty snippet collection");
                (
                    Self {
                        storage,
                        snippets: Vec::new(),
                    },
                    Some(e),
                )
            }
        }
    }

    fn read(storage: &dyn Storage) -> Result<Vec<Snippet>, StoreError> {
        match storage.get(SNIPPETS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(StoreError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, snippets: &[Snippet]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snippets).map_err(StoreError::Serialize)?;
        self.storage.set(SNIPPETS_KEY, &raw)?;
        Ok(())
    }

    /// Append a snippet and persist the collection.
    ///
    /// Returns `Ok(false)` without touching anything when the name or the
    /// code is blank.
    pub fn save(&mut self, name: &str, code: &str, language: Language) -> Result<bool, StoreError> {
        if name.trim().is_empty() || code.trim().is_empty() {
            return Ok(false);
        }

        let mut updated = self.snippets.clone();
        updated.push(Snippet::new(name, code, language));
        self.persist(&updated)?;
        self.snippets = updated;

        tracing::debug!(name, %language, total = self.snippets.len(), "snippet saved");
        Ok(true)
    }

    pub fn list(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn get(&self, index: usize) -> Option<&Snippet> {
        self.snippets.get(index)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Edit state for a saved snippet
    pub fn load(snippet: &Snippet) -> (String, Language) {
        (snippet.code.clone(), snippet.language)
    }

    /// Remove the snippet at `index` and persist. `Ok(None)` if out of range.
    pub fn delete(&mut self, index: usize) -> Result<Option<Snippet>, StoreError> {
        if index >= self.snippets.len() {
            return Ok(None);
        }

        let mut updated = self.snippets.clone();
        let removed = updated.remove(index);
        self.persist(&updated)?;
        self.snippets = updated;

        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_save_and_reopen() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        let mut store = SnippetStore::open(storage.clone()).unwrap();
        assert!(store.save("x", "code1", Language::Solidity).unwrap());

        let reopened = SnippetStore::open(storage).unwrap();
        assert_eq!(
            reopened.list(),
            &[Snippet::new("x", "code1", Language::Solidity)]
        );
    }

    #[test]
    fn test_blank_name_or_code_is_a_no_op() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = SnippetStore::open(storage.clone()).unwrap();

        assert!(!store.save("", "code", Language::Solidity).unwrap());
        assert!(!store.save("   ", "code", Language::Solidity).unwrap());
        assert!(!store.save("name", "\n\t", Language::Vyper).unwrap());

        assert!(store.is_empty());
        assert_eq!(storage.get(SNIPPETS_KEY).unwrap(), None);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = SnippetStore::open(storage).unwrap();

        store.save("vault", "v1", Language::Solidity).unwrap();
        store.save("vault", "v2", Language::Vyper).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(
            SnippetStore::load(&store.list()[1]),
            ("v2".to_string(), Language::Vyper)
        );
    }

    #[test]
    fn test_corrupt_data() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage.set(SNIPPETS_KEY, "{not json").unwrap();

        assert!(matches!(
            SnippetStore::open(storage.clone()),
            Err(StoreError::Corrupt(_))
        ));

        let (store, error) = SnippetStore::open_or_default(storage);
        assert!(store.is_empty());
        assert!(matches!(error, Some(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_delete() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = SnippetStore::open(storage.clone()).unwrap();
        store.save("a", "1", Language::Solidity).unwrap();
        store.save("b", "2", Language::Solidity).unwrap();

        let removed = store.delete(0).unwrap().unwrap();
        assert_eq!(removed.name, "a");
        assert!(store.delete(5).unwrap().is_none());

        let reopened = SnippetStore::open(storage).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.list()[0].name, "b");
    }

    #[test]
    fn test_failed_write_leaves_collection_unchanged() {
        let mut store = SnippetStore::open(Arc::new(ReadOnlyStorage)).unwrap();

        let err = store.save("x", "code", Language::Solidity).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(store.is_empty());
    }
}
