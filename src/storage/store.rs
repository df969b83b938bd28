use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DataKey, KeyValueStorage};
use crate::models::{Event, User};
use crate::utils::error::AppResult;

/// Typed view over the storage medium.
///
/// Each key holds one JSON document that is rewritten in full on every save.
/// A key that was never written, or whose contents no longer parse, reads as
/// absent.
#[derive(Clone)]
pub struct PersistentStore {
    medium: Arc<dyn KeyValueStorage>,
}

impl PersistentStore {
    pub fn new(medium: Arc<dyn KeyValueStorage>) -> Self {
        Self { medium }
    }

    pub fn load<T: DeserializeOwned>(&self, key: DataKey) -> AppResult<Option<T>> {
        let Some(raw) = self.medium.get_item(key.as_str())? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Ignoring malformed stored value");
                Ok(None)
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: DataKey, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.medium.set_item(key.as_str(), &raw)
    }

    pub fn remove(&self, key: DataKey) -> AppResult<()> {
        self.medium.remove_item(key.as_str())
    }

    pub fn load_events(&self) -> AppResult<Option<Vec<Event>>> {
        self.load(DataKey::Events)
    }

    pub fn save_events(&self, events: &[Event]) -> AppResult<()> {
        self.save(DataKey::Events, events)
    }

    pub fn load_user(&self) -> AppResult<Option<User>> {
        self.load(DataKey::User)
    }

    pub fn save_user(&self, user: &User) -> AppResult<()> {
        self.save(DataKey::User, user)
    }

    pub fn clear_user(&self) -> AppResult<()> {
        self.remove(DataKey::User)
    }
}
