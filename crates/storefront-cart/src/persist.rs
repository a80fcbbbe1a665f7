//! Durable cart identity.
//!
//! The cart id is the only piece of cart state that survives a reload.
//! Everything else is re-derived from the remote platform at session start,
//! since prices and availability may have changed server-side.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure while reading or writing the persisted cart id.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cart id storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cart id storage error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serialize/deserialize boundary for the persisted cart id.
///
/// `load` returning `None` means no session exists yet; `save` replaces the
/// stored id wholesale (ids are never merged).
pub trait CartIdStore: Send + Sync {
    /// The stored cart id, if any.
    fn load(&self) -> Option<String>;

    /// Replace the stored cart id.
    fn save(&self, cart_id: &str) -> Result<(), PersistError>;

    /// Forget the stored cart id.
    fn clear(&self) -> Result<(), PersistError>;
}

/// Process-lifetime store, for tests and short-lived embedders.
#[derive(Debug, Default)]
pub struct MemoryCartIdStore {
    id: Mutex<Option<String>>,
}

impl MemoryCartIdStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartIdStore for MemoryCartIdStore {
    fn load(&self) -> Option<String> {
        self.id.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, cart_id: &str) -> Result<(), PersistError> {
        *self.id.lock().unwrap_or_else(|e| e.into_inner()) = Some(cart_id.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistError> {
        *self.id.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// The persisted record: exactly one field.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCartId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cart_id: Option<String>,
}

/// Cart id persisted as a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileCartIdStore {
    path: PathBuf,
}

impl JsonFileCartIdStore {
    /// Create a store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartIdStore for JsonFileCartIdStore {
    fn load(&self) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "failed to read cart id");
                return None;
            }
        };
        match serde_json::from_str::<StoredCartId>(&content) {
            Ok(record) => record.cart_id,
            Err(error) => {
                // A corrupt record is treated as an absent session, not a fault.
                tracing::warn!(%error, path = %self.path.display(), "malformed cart id record");
                None
            }
        }
    }

    fn save(&self, cart_id: &str) -> Result<(), PersistError> {
        let record = StoredCartId {
            cart_id: Some(cart_id.to_string()),
        };
        let content = serde_json::to_string(&record)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
