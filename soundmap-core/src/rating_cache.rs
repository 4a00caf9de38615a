//! The user's own most recent rating per sample.
//!
//! Values live in a [`KeyValueStore`] under `rating_<sample id>` as a single
//! decimal digit. They seed the "my rating" field shown next to the computed
//! average; they never replace it.

use thiserror::Error;

use crate::{KeyValueStore, RatingError, RatingValue, StoreError};

const RATING_KEY_PREFIX: &str = "rating_";

/// Store key holding the cached rating for `sample_id`.
#[must_use]
pub fn rating_key(sample_id: u64) -> String {
    format!("{RATING_KEY_PREFIX}{sample_id}")
}

/// Errors raised by [`RatingCache`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingCacheError {
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The stored text is not a valid rating.
    #[error("cached rating {raw:?} for sample {sample_id} is invalid: {source}")]
    InvalidStoredRating {
        /// Sample whose cache entry is corrupt.
        sample_id: u64,
        /// Text found in the store.
        raw: String,
        /// Parse failure.
        #[source]
        source: RatingError,
    },
}

/// Per-sample "my rating" cache over a [`KeyValueStore`].
///
/// # Examples
/// ```
/// use soundmap_core::{MemoryKeyValueStore, RatingCache, RatingValue};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut cache = RatingCache::new(MemoryKeyValueStore::default());
/// cache.set_cached_rating(12, RatingValue::new(4)?)?;
/// assert_eq!(cache.cached_rating(12)?, Some(RatingValue::new(4)?));
/// assert_eq!(cache.cached_rating(13)?, None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RatingCache<S> {
    store: S,
}

impl<S: KeyValueStore> RatingCache<S> {
    /// Wrap `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The cached rating for `sample_id`, if one was stored.
    ///
    /// # Errors
    /// Returns [`RatingCacheError::Store`] when the store cannot be read and
    /// [`RatingCacheError::InvalidStoredRating`] when the entry is corrupt.
    pub fn cached_rating(&self, sample_id: u64) -> Result<Option<RatingValue>, RatingCacheError> {
        let Some(raw) = self.store.get(&rating_key(sample_id))? else {
            return Ok(None);
        };
        raw.parse()
            .map(Some)
            .map_err(|source| RatingCacheError::InvalidStoredRating {
                sample_id,
                raw,
                source,
            })
    }

    /// Cache `value` as the user's rating for `sample_id`.
    ///
    /// # Errors
    /// Returns [`RatingCacheError::Store`] when the store rejects the write.
    pub fn set_cached_rating(
        &mut self,
        sample_id: u64,
        value: RatingValue,
    ) -> Result<(), RatingCacheError> {
        self.store
            .set(&rating_key(sample_id), &value.to_string())
            .map_err(RatingCacheError::from)
    }

    /// Release the backing store.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }
}
