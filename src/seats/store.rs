//! Seat states and the current selection

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SeatId;
use crate::layout::LayoutConfig;

/// Booking state of one seat
///
/// `Available -> Reserved -> Occupied`, plus `Available -> Occupied` for a
/// direct purchase and `Reserved | Occupied -> Available` for cancel/refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    #[default]
    Available,
    Reserved,
    Occupied,
}

/// Seats picked by the user but not yet committed
///
/// Set semantics, iterated in insertion order. Group bookings pair member
/// `i` with the `i`-th selected seat, so the order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    seats: Vec<SeatId>,
}

impl Selection {
    pub fn contains(&self, id: SeatId) -> bool {
        self.seats.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.seats.iter().copied()
    }

    pub fn as_slice(&self) -> &[SeatId] {
        &self.seats
    }

    /// Selected seats sorted row-major
    pub fn sorted(&self) -> Vec<SeatId> {
        let mut seats = self.seats.clone();
        seats.sort();
        seats
    }

    fn insert(&mut self, id: SeatId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.seats.push(id);
        true
    }

    fn remove(&mut self, id: SeatId) -> bool {
        let before = self.seats.len();
        self.seats.retain(|&s| s != id);
        self.seats.len() != before
    }

    fn clear(&mut self) {
        self.seats.clear();
    }
}

/// Seat state map plus the active selection
///
/// The selection only ever holds ids that exist in the state map.
#[derive(Debug, Clone, Default)]
pub struct SeatStore {
    states: BTreeMap<SeatId, SeatState>,
    selection: Selection,
}

impl SeatStore {
    /// Create a store with every seat of `layout` available
    pub fn new(layout: &LayoutConfig) -> Self {
        let mut store = Self::default();
        store.initialize(layout);
        store
    }

    /// Reset every seat of `layout` to available and clear the selection
    pub fn initialize(&mut self, layout: &LayoutConfig) {
        self.states = layout
            .seat_ids()
            .map(|id| (id, SeatState::Available))
            .collect();
        self.selection.clear();
    }

    /// State of a seat, `None` if it is not part of the layout
    pub fn get(&self, id: SeatId) -> Option<SeatState> {
        self.states.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_available(&self, id: SeatId) -> bool {
        self.get(id) == Some(SeatState::Available)
    }

    /// Move a seat to `to` if its current state is one of `from`
    ///
    /// Returns whether the transition happened.
    pub fn transition(&mut self, id: SeatId, from: &[SeatState], to: SeatState) -> bool {
        match self.states.get_mut(&id) {
            Some(state) if from.contains(state) => {
                *state = to;
                true
            }
            _ => false,
        }
    }

    /// Ids of all seats in `state`, row-major
    pub fn ids_in(&self, state: SeatState) -> Vec<SeatId> {
        self.states
            .iter()
            .filter(|&(_, &s)| s == state)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Count of seats in `state`
    pub fn count(&self, state: SeatState) -> usize {
        self.states.values().filter(|&&s| s == state).count()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: SeatId) -> bool {
        self.selection.contains(id)
    }

    /// Replace the selection with a single seat
    pub fn select_only(&mut self, id: SeatId) -> bool {
        if !self.states.contains_key(&id) {
            return false;
        }
        self.selection.clear();
        self.selection.insert(id)
    }

    /// Add the seat if absent, remove it if present
    ///
    /// Returns whether the seat is selected afterwards.
    pub fn toggle_selected(&mut self, id: SeatId) -> bool {
        if !self.states.contains_key(&id) {
            return false;
        }
        if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id)
        }
    }

    /// Replace the selection with `ids`, skipping unknown seats and duplicates
    pub fn select_all(&mut self, ids: &[SeatId]) {
        self.selection.clear();
        for &id in ids {
            if self.states.contains_key(&id) {
                self.selection.insert(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
