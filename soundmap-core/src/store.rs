//! On-device key-value storage.
//!
//! The `KeyValueStore` trait models the simple string store the client keeps
//! its profile and "my rating" cache in: get, set and remove by key, last
//! write wins, no transactions and no expiry.

use std::collections::HashMap;

use thiserror::Error;

/// Errors reported by [`KeyValueStore`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Reading a key failed.
    #[error("failed to read {key:?} from the key-value store: {message}")]
    Read {
        /// Requested key.
        key: String,
        /// Backend failure description.
        message: String,
    },
    /// Writing a key failed.
    #[error("failed to write {key:?} to the key-value store: {message}")]
    Write {
        /// Key being written.
        key: String,
        /// Backend failure description.
        message: String,
    },
    /// Removing a key failed.
    #[error("failed to remove {key:?} from the key-value store: {message}")]
    Remove {
        /// Key being removed.
        key: String,
        /// Backend failure description.
        message: String,
    },
}

/// String-keyed storage with last-write-wins semantics.
///
/// # Examples
///
/// ```rust
/// use soundmap_core::{KeyValueStore, MemoryKeyValueStore};
///
/// let mut store = MemoryKeyValueStore::default();
/// store.set("greeting", "moin")?;
/// assert_eq!(store.get("greeting")?, Some("moin".to_owned()));
/// assert_eq!(store.get("missing")?, None);
/// # Ok::<(), soundmap_core::StoreError>(())
/// ```
pub trait KeyValueStore {
    /// Return the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
