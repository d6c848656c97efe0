//! Key-value persistence for player progress and settings
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic file writes (tmp → save)
//! - Corrupt or foreign data is treated as missing

use std::collections::HashMap;
use std::io;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

mod file;

pub use file::FileStore;

/// Current envelope format version
pub const FORMAT_VERSION: u32 = 1;

/// String storage addressed by key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Volatile store, used in tests and when no disk is available
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Load and decode a value; `None` if missing, corrupt or from another format version
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str::<Envelope<T>>(&json) {
        Ok(envelope) if envelope.version == FORMAT_VERSION => Some(envelope.data),
        Ok(envelope) => {
            log::warn!(
                "Ignoring '{}' saved with format version {} (expected {})",
                key,
                envelope.version,
                FORMAT_VERSION
            );
            None
        }
        Err(e) => {
            log::warn!("Ignoring corrupt '{}': {}", key, e);
            None
        }
    }
}

/// Encode and store a value; failures are logged, never retried
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> bool {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        data: value,
    };
    let json = match serde_json::to_string(&envelope) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to encode '{}': {}", key, e);
            return false;
        }
    };
    match store.set(key, &json) {
        Ok(()) => {
            log::debug!("Saved '{}' ({} bytes)", key, json.len());
            true
        }
        Err(e) => {
            log::warn!("Failed to save '{}': {}", key, e);
            false
        }
    }
}
