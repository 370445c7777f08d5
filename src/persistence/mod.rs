//! Client-side persistence
//!
//! Features:
//! - String key-value store abstraction (LocalStorage on web, memory elsewhere)
//! - JSON documents for occupied seats and the reservation log
//! - Corrupt or missing data is treated as empty, never as an error

pub mod documents;

use std::collections::HashMap;

pub use documents::{
    clear_seat_data, load_occupied, load_reservations, save_occupied, save_reservations,
};

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}
