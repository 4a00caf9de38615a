//! The local user profile: a display name and a photo URI.

use thiserror::Error;

use crate::{KeyValueStore, StoreError};

const NAME_KEY: &str = "name";
const PHOTO_KEY: &str = "selectedImage";

/// Locally stored profile details. Both fields are optional until set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    /// Display name.
    pub name: Option<String>,
    /// URI of the profile photo chosen on the device.
    pub photo_uri: Option<String>,
}

/// Errors raised by [`ProfileStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A name made only of whitespace was supplied.
    #[error("profile name must not be blank")]
    BlankName,
}

/// Reads and writes a [`Profile`] through a [`KeyValueStore`].
///
/// # Examples
/// ```
/// use soundmap_core::{MemoryKeyValueStore, Profile, ProfileStore};
///
/// # fn main() -> Result<(), soundmap_core::ProfileError> {
/// let mut profiles = ProfileStore::new(MemoryKeyValueStore::default());
/// profiles.save(&Profile { name: Some("Ada".into()), photo_uri: None })?;
/// assert_eq!(profiles.load()?.name.as_deref(), Some("Ada"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Wrap `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Load whatever profile fields have been saved.
    ///
    /// # Errors
    /// Returns [`ProfileError::Store`] when the store cannot be read.
    pub fn load(&self) -> Result<Profile, ProfileError> {
        Ok(Profile {
            name: self.store.get(NAME_KEY)?,
            photo_uri: self.store.get(PHOTO_KEY)?,
        })
    }

    /// Persist the fields present in `profile`; absent fields keep their
    /// stored values.
    ///
    /// # Errors
    /// Returns [`ProfileError::BlankName`] for a whitespace-only name, before
    /// anything is written, and [`ProfileError::Store`] when a write fails.
    pub fn save(&mut self, profile: &Profile) -> Result<(), ProfileError> {
        if profile
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ProfileError::BlankName);
        }
        if let Some(name) = profile.name.as_deref() {
            self.store.set(NAME_KEY, name.trim())?;
        }
        if let Some(photo_uri) = profile.photo_uri.as_deref() {
            self.store.set(PHOTO_KEY, photo_uri)?;
        }
        Ok(())
    }

    /// Forget the stored photo URI. The name is left alone.
    ///
    /// # Errors
    /// Returns [`ProfileError::Store`] when the removal cannot be persisted.
    pub fn clear_photo(&mut self) -> Result<(), ProfileError> {
        self.store.remove(PHOTO_KEY)?;
        Ok(())
    }
}
