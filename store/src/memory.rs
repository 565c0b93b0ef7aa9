use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::models::PrefValue;
use crate::prefs::PrefStore;

/// In-memory PrefStore for testing and in-process fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryPrefs {
    values: Arc<Mutex<HashMap<String, PrefValue>>>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefs {
    async fn put_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), PrefValue::Bool(value));
        Ok(())
    }

    async fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), PrefValue::String(value.to_string()));
        Ok(())
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        match self.values.lock().unwrap().get(key) {
            None => Ok(None),
            Some(PrefValue::Bool(value)) => Ok(Some(*value)),
            Some(PrefValue::String(_)) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.values.lock().unwrap().get(key) {
            None => Ok(None),
            Some(PrefValue::String(value)) => Ok(Some(value.clone())),
            Some(PrefValue::Bool(_)) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.values.lock().unwrap().clear();
        Ok(())
    }
}
