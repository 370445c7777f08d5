//! LocalStorage-backed key-value store

use crate::persistence::KeyValueStore;

/// Browser LocalStorage
///
/// When storage is unavailable (private mode, sandboxed iframe) reads return
/// nothing and writes are dropped with a warning.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, bookings will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("Failed to write {key}: {e:?}");
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_item(key) {
                log::warn!("Failed to remove {key}: {e:?}");
            }
        }
    }
}
