//! # Preferences — session persistence over an abstract key-value store
//!
//! This module is the local half of the session bootstrap. [`Preferences`]
//! turns a flat per-key store into the single place the app reads and writes
//! its signed-in state. All access goes through the [`PrefStore`] trait, so
//! the same logic works against an in-memory store (tests, previews) or a
//! TOML file on disk (desktop persistence).
//!
//! ## [`PrefStore`] trait
//!
//! An async interface with typed `put`/`get` pairs for bool and string
//! preferences, plus `remove`/`clear` for sign-out style resets. Each call
//! persists independently; the trait offers no transaction. Implementations
//! live in sibling modules ([`crate::memory`], [`crate::file_store`]).
//!
//! ## Session write ordering
//!
//! [`store_session`](Preferences::store_session) issues the four writes in a
//! fixed order: signed-in flag, user id, name, image (removed when the new
//! session has none, so a previous session's blob never survives an
//! overwrite). The store cannot make
//! that sequence atomic, so [`session`](Preferences::session) compensates on
//! the read side: a record with the flag set but the id or name missing is
//! reported as signed-out rather than returned half-built.

use crate::error::StoreError;
use crate::models::{keys, Session};

/// Async trait for the device-local key-value preference store.
pub trait PrefStore {
    fn put_bool(
        &self,
        key: &str,
        value: bool,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn put_string(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn get_bool(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<bool>, StoreError>>;
    fn get_string(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>>;
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn clear(&self) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Session-level view over a PrefStore.
pub struct Preferences<S: PrefStore> {
    store: S,
}

impl<S: PrefStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a freshly established session.
    ///
    /// Writes flag, user id, name, then image. An image-less session removes
    /// the image key, so overwriting never leaves a previous user's blob
    /// behind. Any failure propagates immediately and leaves the remaining
    /// keys unwritten.
    pub async fn store_session(&self, session: &Session) -> Result<(), StoreError> {
        self.store.put_bool(keys::IS_SIGNED_IN, true).await?;
        self.store.put_string(keys::USER_ID, &session.user_id).await?;
        self.store.put_string(keys::NAME, &session.name).await?;
        match &session.image {
            Some(image) => self.store.put_string(keys::IMAGE, image).await?,
            None => self.store.remove(keys::IMAGE).await?,
        }
        Ok(())
    }

    /// Whether a signed-in flag is set. Checked at launch to skip the
    /// sign-in screen.
    pub async fn is_signed_in(&self) -> Result<bool, StoreError> {
        Ok(self
            .store
            .get_bool(keys::IS_SIGNED_IN)
            .await?
            .unwrap_or(false))
    }

    /// Read back the current session, or `None` when signed out.
    ///
    /// A record missing its user id or name counts as signed out; callers
    /// never observe a partially written session.
    pub async fn session(&self) -> Result<Option<Session>, StoreError> {
        if !self.is_signed_in().await? {
            return Ok(None);
        }
        let user_id = self.store.get_string(keys::USER_ID).await?;
        let name = self.store.get_string(keys::NAME).await?;
        let (Some(user_id), Some(name)) = (user_id, name) else {
            return Ok(None);
        };
        let image = self.store.get_string(keys::IMAGE).await?;
        Ok(Some(Session {
            user_id,
            name,
            image,
        }))
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
