//! # Remote user directory — abstract document store
//!
//! The chat backend stores one document per registered account in a named
//! collection. This module defines the two operations the credential core
//! consumes — create and equality-query — behind the [`DocumentStore`]
//! trait, so the bootstrap logic works against the hosted backend or the
//! in-memory [`MemoryDirectory`] used by tests and offline development.
//!
//! ## Document shape
//!
//! A [`Document`] is a generated id plus a flat string field map. User
//! documents carry [`FIELD_NAME`], [`FIELD_EMAIL`], [`FIELD_PASSWORD`] and
//! [`FIELD_IMAGE`]. No schema is enforced beyond field presence, and no
//! uniqueness constraint exists on email; sign-in takes the first match in
//! the backend's returned order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Field names used in documents of the users collection.
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_IMAGE: &str = "image";

/// Default collection holding one document per registered user.
pub const USERS_COLLECTION: &str = "users";

/// Failures reported by, or interpreted from, the remote store.
///
/// `QueryFailed` and `NoMatch` share one user-facing message so a failed
/// sign-in never reveals which of email or password was wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Document creation rejected; carries the backend's message verbatim.
    #[error("{0}")]
    CreateFailed(String),
    /// The sign-in query could not be executed.
    #[error("Unable to sign in")]
    QueryFailed,
    /// The sign-in query matched no user.
    #[error("Unable to sign in")]
    NoMatch,
}

/// One stored document: a generated id plus a flat field map.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: HashMap<String, String>,
}

impl Document {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Async trait over the remote document store.
pub trait DocumentStore {
    /// Create a document in `collection`; returns the assigned id.
    fn create(
        &self,
        collection: &str,
        fields: HashMap<String, String>,
    ) -> impl std::future::Future<Output = Result<String, RemoteError>>;

    /// Equality-AND query against `collection`. Results come back in the
    /// backend's natural order; callers taking "the first match" inherit
    /// that order.
    fn query_equal(
        &self,
        collection: &str,
        filters: &[(&str, &str)],
    ) -> impl std::future::Future<Output = Result<Vec<Document>, RemoteError>>;
}

/// In-memory DocumentStore for testing and offline development.
///
/// Collections keep insertion order, so queries return documents
/// oldest-first. The `fail_next_*` hooks let tests exercise the failure
/// paths without a real backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryDirectory {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
    fail_create: Arc<Mutex<Option<String>>>,
    fail_query: Arc<Mutex<bool>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` call fail with the given message.
    pub fn fail_next_create(&self, message: &str) {
        *self.fail_create.lock().unwrap() = Some(message.to_string());
    }

    /// Make the next `query_equal` call fail.
    pub fn fail_next_query(&self) {
        *self.fail_query.lock().unwrap() = true;
    }

    /// Number of documents currently stored in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl DocumentStore for MemoryDirectory {
    async fn create(
        &self,
        collection: &str,
        fields: HashMap<String, String>,
    ) -> Result<String, RemoteError> {
        if let Some(message) = self.fail_create.lock().unwrap().take() {
            return Err(RemoteError::CreateFailed(message));
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn query_equal(
        &self,
        collection: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Document>, RemoteError> {
        if std::mem::take(&mut *self.fail_query.lock().unwrap()) {
            return Err(RemoteError::QueryFailed);
        }
        let collections = self.collections.lock().unwrap();
        let documents = collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(documents
            .iter()
            .filter(|doc| {
                filters
                    .iter()
                    .all(|(field, value)| doc.field(field) == Some(*value))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str, password: &str) -> HashMap<String, String> {
        HashMap::from([
            (FIELD_NAME.to_string(), name.to_string()),
            (FIELD_EMAIL.to_string(), email.to_string()),
            (FIELD_PASSWORD.to_string(), password.to_string()),
        ])
    }

    #[tokio::test]
    async fn test_create_and_query() {
        let directory = MemoryDirectory::new();
        let id = directory
            .create(USERS_COLLECTION, user("Ann", "ann@x.com", "p1"))
            .await
            .unwrap();

        let matches = directory
            .query_equal(USERS_COLLECTION, &[(FIELD_EMAIL, "ann@x.com")])
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, id);
        assert_eq!(matches[0].field(FIELD_NAME), Some("Ann"));
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive() {
        let directory = MemoryDirectory::new();
        directory
            .create(USERS_COLLECTION, user("Ann", "ann@x.com", "p1"))
            .await
            .unwrap();

        // Right email, wrong password
        let matches = directory
            .query_equal(
                USERS_COLLECTION,
                &[(FIELD_EMAIL, "ann@x.com"), (FIELD_PASSWORD, "wrong")],
            )
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_query_preserves_insertion_order() {
        let directory = MemoryDirectory::new();
        let first = directory
            .create(USERS_COLLECTION, user("Ann", "dup@x.com", "p1"))
            .await
            .unwrap();
        directory
            .create(USERS_COLLECTION, user("Imposter", "dup@x.com", "p1"))
            .await
            .unwrap();

        let matches = directory
            .query_equal(USERS_COLLECTION, &[(FIELD_EMAIL, "dup@x.com")])
            .await
            .unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, first);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let directory = MemoryDirectory::new();
        assert!(directory
            .query_equal("nope", &[(FIELD_EMAIL, "a@b.com")])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection_is_one_shot() {
        let directory = MemoryDirectory::new();

        directory.fail_next_create("quota exceeded");
        let err = directory
            .create(USERS_COLLECTION, user("Ann", "ann@x.com", "p1"))
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::CreateFailed("quota exceeded".to_string()));
        assert!(directory.is_empty(USERS_COLLECTION));

        // Next create goes through
        directory
            .create(USERS_COLLECTION, user("Ann", "ann@x.com", "p1"))
            .await
            .unwrap();
        assert_eq!(directory.len(USERS_COLLECTION), 1);

        directory.fail_next_query();
        assert_eq!(
            directory
                .query_equal(USERS_COLLECTION, &[])
                .await
                .unwrap_err(),
            RemoteError::QueryFailed
        );
        assert!(directory.query_equal(USERS_COLLECTION, &[]).await.is_ok());
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            RemoteError::CreateFailed("backend said no".to_string()).to_string(),
            "backend said no"
        );
        assert_eq!(RemoteError::QueryFailed.to_string(), "Unable to sign in");
        assert_eq!(RemoteError::NoMatch.to_string(), "Unable to sign in");
    }
}
