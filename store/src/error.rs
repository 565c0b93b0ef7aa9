use thiserror::Error;

/// Failures reported by the local preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("preference file could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A key exists but holds a value of a different kind than requested
    /// (e.g. `get_bool` on a string preference).
    #[error("preference `{key}` holds a value of the wrong type")]
    WrongType { key: String },
}
