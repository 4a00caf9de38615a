//! A [`KeyValueStore`] persisted as a flat JSON object on disk.
//!
//! The whole map is held in memory and rewritten on every change, first to a
//! hidden sibling file and then renamed over the original. A reader never
//! observes a half-written store.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use soundmap_core::{KeyValueStore, StoreError};
use thiserror::Error;

use crate::fs::{ensure_parent_dir, open_parent};

/// Errors raised while loading or persisting a [`JsonFileStore`].
#[derive(Debug, Error)]
pub enum JsonStoreError {
    /// The store file exists but could not be read.
    #[error("failed to read key-value store {path:?}: {source}")]
    Read {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The store file is not a JSON object of strings.
    #[error("key-value store {path:?} is not a JSON object of strings: {source}")]
    Parse {
        /// Store location.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The store could not be written back.
    #[error("failed to write key-value store {path:?}: {source}")]
    Write {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The entries could not be encoded.
    #[error("failed to encode key-value store {path:?}: {source}")]
    Encode {
        /// Store location.
        path: Utf8PathBuf,
        /// Encoder failure.
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed [`KeyValueStore`].
///
/// # Examples
/// ```no_run
/// use soundmap_core::{RatingCache, RatingValue};
/// use soundmap_data::JsonFileStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = JsonFileStore::open("state/soundmap.json")?;
/// let mut cache = RatingCache::new(store);
/// cache.set_cached_rating(3, RatingValue::new(5)?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Load the store at `path`. A missing file yields an empty store; the
    /// file is created on the first write.
    ///
    /// # Errors
    /// Returns [`JsonStoreError::Read`] or [`JsonStoreError::Parse`] when an
    /// existing file cannot be loaded.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self, JsonStoreError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        debug!("opened key-value store {path} with {} keys", entries.len());
        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
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

    fn persist(&self) -> Result<(), JsonStoreError> {
        let encoded =
            serde_json::to_vec_pretty(&self.entries).map_err(|source| JsonStoreError::Encode {
                path: self.path.clone(),
                source,
            })?;
        self.write_atomically(&encoded)
            .map_err(|source| JsonStoreError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn write_atomically(&self, contents: &[u8]) -> io::Result<()> {
        ensure_parent_dir(&self.path)?;
        let (dir, file_name) = open_parent(&self.path)?;
        let staging = format!(".{file_name}.tmp");
        dir.write(&staging, contents)?;
        dir.rename(&staging, &dir, &file_name)
    }
}

fn load_entries(path: &Utf8Path) -> Result<BTreeMap<String, String>, JsonStoreError> {
    let read = open_parent(path).and_then(|(dir, file_name)| dir.read_to_string(file_name));
    let contents = match read {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(JsonStoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if contents.trim().is_empty() {
        warn!("key-value store {path} is empty; starting fresh");
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&contents).map_err(|source| JsonStoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_owned(), value.to_owned());
        if let Err(err) = self.persist() {
            match previous {
                Some(old) => self.entries.insert(key.to_owned(), old),
                None => self.entries.remove(key),
            };
            return Err(StoreError::Write {
                key: key.to_owned(),
                message: err.to_string(),
            });
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.persist() {
            self.entries.insert(key.to_owned(), previous);
            return Err(StoreError::Remove {
                key: key.to_owned(),
                message: err.to_string(),
            });
        }
        debug!("removed {key:?} from key-value store {}", self.path);
        Ok(())
    }
}
