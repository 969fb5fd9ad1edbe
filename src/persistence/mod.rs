//! Key-value persistence
//!
//! The core never touches a concrete storage API. Everything goes through
//! [`KeyValueStore`], with JSON-encoded values:
//! - `settings`: player settings
//! - `highscores`: ranked leaderboard
//! - `ad-tracker`: daily reward prompt counter
//!
//! Reads fall back to defaults on missing or corrupt data, writes are best
//! effort and only logged on failure.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const SETTINGS_KEY: &str = "settings";
pub const HIGHSCORES_KEY: &str = "highscores";
pub const AD_TRACKER_KEY: &str = "ad-tracker";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode value for key `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// Minimal durable string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Decode a stored value. Missing, unreadable and corrupt all come back as None.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read `{}`: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt `{}`: {}", key, e);
            None
        }
    }
}

/// Encode and store a value
pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// [`save_json`] that logs instead of failing
pub fn save_json_best_effort<T: Serialize>(store: &mut impl KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save_json(store, key, value) {
        log::warn!("Failed to persist `{}`: {}", key, e);
    }
}
