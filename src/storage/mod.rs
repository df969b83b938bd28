//! Key-value storage medium and the typed store layered on top of it.
//!
//! - `KeyValueStorage`: the raw medium, strings in and out under string keys.
//! - `memory`: process-local medium, used by tests and ephemeral runs.
//! - `file`: one file per key inside a data directory.
//! - `store`: typed JSON load/save of the event collection and the current user.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::PersistentStore;

use std::fmt;

use crate::utils::error::AppResult;

/// A flat string key-value medium shared by every consumer.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removing a key that was never written is not an error.
    fn remove_item(&self, key: &str) -> AppResult<()>;

    fn has_item(&self, key: &str) -> AppResult<bool> {
        Ok(self.get_item(key)?.is_some())
    }
}

/// Keys used in the storage medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKey {
    Events,
    User,
}

impl DataKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKey::Events => "events",
            DataKey::User => "user",
        }
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
