pub mod error;
pub mod models;
pub mod prefs;

mod file_store;
mod memory;

pub use error::StoreError;
pub use file_store::FilePrefs;
pub use memory::MemoryPrefs;
pub use models::{keys, PrefValue, Session};
pub use prefs::{PrefStore, Preferences};
