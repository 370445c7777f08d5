//! JSON documents kept in the key-value store
//!
//! Two independent documents:
//! - occupied seats: a JSON array of `"row-seat"` strings
//! - reservation log: a JSON array of [`ReservationRecord`]

use super::KeyValueStore;
use crate::consts::{OCCUPIED_KEY, RESERVATIONS_KEY};
use crate::seats::SeatId;
use crate::tickets::ReservationRecord;

/// Load the occupied seat ids
///
/// Malformed entries are skipped; an unreadable document yields nothing.
pub fn load_occupied(store: &dyn KeyValueStore) -> Vec<SeatId> {
    let Some(json) = store.get(OCCUPIED_KEY) else {
        return Vec::new();
    };

    let raw: Vec<String> = match serde_json::from_str::<Option<Vec<String>>>(&json) {
        Ok(raw) => raw.unwrap_or_default(),
        Err(e) => {
            log::warn!("Ignoring corrupt occupied seat data: {e}");
            return Vec::new();
        }
    };

    raw.iter()
        .filter_map(|s| match s.parse() {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Skipping occupied seat entry: {e}");
                None
            }
        })
        .collect()
}

/// Save the occupied seat ids
pub fn save_occupied(store: &mut dyn KeyValueStore, occupied: &[SeatId]) {
    match serde_json::to_string(occupied) {
        Ok(json) => store.set(OCCUPIED_KEY, &json),
        Err(e) => log::warn!("Failed to encode occupied seats: {e}"),
    }
}

/// Load the reservation log, empty if missing or corrupt
pub fn load_reservations(store: &dyn KeyValueStore) -> Vec<ReservationRecord> {
    let Some(json) = store.get(RESERVATIONS_KEY) else {
        return Vec::new();
    };

    match serde_json::from_str::<Option<Vec<ReservationRecord>>>(&json) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            log::warn!("Ignoring corrupt reservation log: {e}");
            Vec::new()
        }
    }
}

/// Save the whole reservation log
pub fn save_reservations(store: &mut dyn KeyValueStore, records: &[ReservationRecord]) {
    match serde_json::to_string(records) {
        Ok(json) => store.set(RESERVATIONS_KEY, &json),
        Err(e) => log::warn!("Failed to encode reservation log: {e}"),
    }
}

/// Drop both seat documents (used when the hall layout changes)
pub fn clear_seat_data(store: &mut dyn KeyValueStore) {
    store.remove(OCCUPIED_KEY);
    store.remove(RESERVATIONS_KEY);
    log::info!("Cleared persisted seat data");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::tickets::{Party, ReservationStatus};

    #[test]
    fn test_occupied_round_trip() {
        let mut store = MemoryStore::new();
        let ids = vec![SeatId::new(1, 1), SeatId::new(4, 9)];
        save_occupied(&mut store, &ids);
        assert_eq!(store.get(OCCUPIED_KEY).as_deref(), Some(r#"["1-1","4-9"]"#));
        assert_eq!(load_occupied(&store), ids);
    }

    #[test]
    fn test_missing_documents_are_empty() {
        let store = MemoryStore::new();
        assert!(load_occupied(&store).is_empty());
        assert!(load_reservations(&store).is_empty());
    }

    #[test]
    fn test_corrupt_documents_are_empty() {
        let mut store = MemoryStore::new();
        store.set(OCCUPIED_KEY, "not json at all");
        store.set(RESERVATIONS_KEY, r#"{"oops": 1}"#);
        assert!(load_occupied(&store).is_empty());
        assert!(load_reservations(&store).is_empty());
    }

    #[test]
    fn test_null_document_is_empty() {
        let mut store = MemoryStore::new();
        store.set(OCCUPIED_KEY, "null");
        store.set(RESERVATIONS_KEY, "null");
        assert!(load_occupied(&store).is_empty());
        assert!(load_reservations(&store).is_empty());
    }

    #[test]
    fn test_bad_occupied_entries_are_skipped() {
        let mut store = MemoryStore::new();
        store.set(OCCUPIED_KEY, r#"["2-3","garbage","0-1","7-7"]"#);
        assert_eq!(load_occupied(&store), vec![SeatId::new(2, 3), SeatId::new(7, 7)]);
    }

    #[test]
    fn test_reservation_log_round_trip() {
        let mut store = MemoryStore::new();
        let record = ReservationRecord::new(
            Party::Individual { name: "Ada".into(), age: 36 },
            vec![SeatId::new(5, 1)],
            ReservationStatus::Reserved,
            None,
            1_000.0,
        );
        save_reservations(&mut store, std::slice::from_ref(&record));
        assert_eq!(load_reservations(&store), vec![record]);
    }

    #[test]
    fn test_clear_seat_data() {
        let mut store = MemoryStore::new();
        save_occupied(&mut store, &[SeatId::new(1, 1)]);
        save_reservations(&mut store, &[]);
        store.set("unrelated", "keep");
        clear_seat_data(&mut store);
        assert_eq!(store.len(), 1);
    }
}
