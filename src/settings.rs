//! Hall presets and user settings
//!
//! Persisted separately from seat data in the key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TICKET_PRICE, SETTINGS_KEY};
use crate::persistence::KeyValueStore;

/// Fixed arc parameters of a hall preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HallPreset {
    pub rows: u32,
    pub seats_per_row: u32,
    pub arc_radius: f32,
    /// Distance of the arc center below the canvas bottom edge
    pub center_offset_y: f32,
    pub row_spacing: f32,
}

/// Named hall sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HallSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl HallSize {
    pub const ALL: [HallSize; 3] = [HallSize::Small, HallSize::Medium, HallSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            HallSize::Small => "Small",
            HallSize::Medium => "Medium",
            HallSize::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" => Some(HallSize::Small),
            "medium" | "med" => Some(HallSize::Medium),
            "large" => Some(HallSize::Large),
            other => other.parse().ok().and_then(Self::from_capacity),
        }
    }

    /// Look up a preset by its seat count (100, 200 or 300)
    pub fn from_capacity(capacity: u32) -> Option<Self> {
        match capacity {
            100 => Some(HallSize::Small),
            200 => Some(HallSize::Medium),
            300 => Some(HallSize::Large),
            _ => None,
        }
    }

    /// Total seats in this hall
    pub fn capacity(&self) -> u32 {
        let preset = self.preset();
        preset.rows * preset.seats_per_row
    }

    /// Arc parameters for this hall
    pub fn preset(&self) -> HallPreset {
        match self {
            HallSize::Small => HallPreset {
                rows: 5,
                seats_per_row: 20,
                arc_radius: 600.0,
                center_offset_y: 200.0,
                row_spacing: 15.0,
            },
            HallSize::Medium => HallPreset {
                rows: 10,
                seats_per_row: 20,
                arc_radius: 900.0,
                center_offset_y: 300.0,
                row_spacing: 15.0,
            },
            // Tighter rows so 15 of them fit
            HallSize::Large => HallPreset {
                rows: 15,
                seats_per_row: 20,
                arc_radius: 1000.0,
                center_offset_y: 350.0,
                row_spacing: 8.0,
            },
        }
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active hall preset
    pub hall: HallSize,
    /// Price of one ticket, in whole currency units
    pub ticket_price: u32,
    /// Symbol prefixed to prices in messages
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hall: HallSize::Medium,
            ticket_price: DEFAULT_TICKET_PRICE,
            currency: "¥".to_string(),
        }
    }
}

impl Settings {
    /// Format an amount with the configured currency symbol
    pub fn format_price(&self, amount: u32) -> String {
        format!("{}{}", self.currency, amount)
    }

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(SETTINGS_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(SETTINGS_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_hall_from_capacity() {
        assert_eq!(HallSize::from_capacity(100), Some(HallSize::Small));
        assert_eq!(HallSize::from_capacity(200), Some(HallSize::Medium));
        assert_eq!(HallSize::from_capacity(300), Some(HallSize::Large));
        assert_eq!(HallSize::from_capacity(250), None);
    }

    #[test]
    fn test_hall_capacity_matches_preset() {
        for hall in HallSize::ALL {
            assert_eq!(HallSize::from_capacity(hall.capacity()), Some(hall));
        }
    }

    #[test]
    fn test_hall_from_str() {
        assert_eq!(HallSize::from_str("LARGE"), Some(HallSize::Large));
        assert_eq!(HallSize::from_str("med"), Some(HallSize::Medium));
        assert_eq!(HallSize::from_str("100"), Some(HallSize::Small));
        assert_eq!(HallSize::from_str("huge"), None);
    }

    #[test]
    fn test_settings_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            hall: HallSize::Large,
            ticket_price: 60,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(Settings::default().format_price(90), "¥90");
    }
}
