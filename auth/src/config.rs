//! Client configuration for the credential module.
//!
//! Stored as TOML alongside the app's other settings:
//!
//! ```toml
//! users_collection = "users"
//! prefs_file = "chatpal-prefs.toml"
//! ```
//!
//! Both fields have serde defaults, so a missing or empty file is
//! equivalent to [`AuthConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::remote::USERS_COLLECTION;

/// Configuration for the sign-up/sign-in flows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Remote collection holding one document per registered user.
    #[serde(default = "default_users_collection")]
    pub users_collection: String,
    /// File name used by the file-backed preference store.
    #[serde(default = "default_prefs_file")]
    pub prefs_file: String,
}

fn default_users_collection() -> String {
    USERS_COLLECTION.to_string()
}

fn default_prefs_file() -> String {
    "chatpal-prefs.toml".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users_collection: default_users_collection(),
            prefs_file: default_prefs_file(),
        }
    }
}

impl AuthConfig {
    /// Builder method to target a different users collection.
    pub fn with_users_collection(mut self, collection: impl Into<String>) -> Self {
        self.users_collection = collection.into();
        self
    }

    /// Builder method to persist preferences under a different file name.
    pub fn with_prefs_file(mut self, file: impl Into<String>) -> Self {
        self.prefs_file = file.into();
        self
    }

    /// Full path of the preference file under the app's data directory,
    /// for constructing a [`store::FilePrefs`].
    pub fn prefs_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.prefs_file)
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
