//! # Session model and well-known preference keys
//!
//! Defines what the rest of the app reads back after a successful sign-up or
//! sign-in, and the exact key strings those values are persisted under.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Session`] | The local record marking the app as authenticated for one user: remote document id, display name, and the base64 profile image (absent for accounts created without one). |
//! | [`PrefValue`] | A single stored preference value — bool or string, serialized untagged so the TOML file reads naturally. |
//!
//! The key names in [`keys`] are wire-compatible with the hosted chat backend
//! and must not be renamed.

use serde::{Deserialize, Serialize};

/// Preference keys shared with the remote user documents and the launcher's
/// signed-in check.
pub mod keys {
    /// Whether a user is currently signed in.
    pub const IS_SIGNED_IN: &str = "isSignedIn";
    /// Remote document id of the signed-in user.
    pub const USER_ID: &str = "userId";
    /// Display name of the signed-in user.
    pub const NAME: &str = "name";
    /// Base64-encoded profile image of the signed-in user.
    pub const IMAGE: &str = "image";
}

/// A single stored preference value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    String(String),
}

/// The local record marking the application as authenticated for one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Remote document id: "u1"
    pub user_id: String,
    /// Display name shown in the conversation list: "Ann"
    pub name: String,
    /// Base64 profile image blob, or None if the account has none
    pub image: Option<String>,
}
