use std::collections::HashMap;
use std::io;

use super::{KeyValueStore, StoreError};

/// In-process store. `failing()` builds one that rejects every operation,
/// which is how tests exercise the fallback paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail: true,
        }
    }

    fn unavailable(key: &str) -> StoreError {
        StoreError::Io {
            key: key.to_string(),
            source: io::Error::other("store unavailable"),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail {
            return Err(Self::unavailable(key));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail {
            return Err(Self::unavailable(key));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
