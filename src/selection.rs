//! Seat selection: pointer taps and auto-assignment
//!
//! Age rules for auto-assignment:
//! - under 15: not in the first three rows
//! - over 60: not in the last three rows
//!
//! Repeated auto-selects avoid the previous result so the user can cycle
//! through options.

use glam::Vec2;

use crate::consts::{CHILD_MAX_AGE, MAX_GROUP_SIZE, RESTRICTED_ROWS, SENIOR_MIN_AGE};
use crate::error::{BookingError, Result};
use crate::layout::{LayoutConfig, seat_at};
use crate::seats::{SeatId, SeatStore};

/// Whether a person of `age` may be seated in `row`
pub fn row_allowed(layout: &LayoutConfig, age: u32, row: u32) -> bool {
    if age < CHILD_MAX_AGE && row <= RESTRICTED_ROWS {
        return false;
    }
    if age > SENIOR_MIN_AGE && row > layout.rows.saturating_sub(RESTRICTED_ROWS) {
        return false;
    }
    true
}

/// Rows every member of a party may sit in, ascending
pub fn eligible_rows(layout: &LayoutConfig, ages: &[u32]) -> Vec<u32> {
    (1..=layout.rows)
        .filter(|&row| ages.iter().all(|&age| row_allowed(layout, age, row)))
        .collect()
}

/// Translates pointer input and auto-select requests into selection changes
///
/// Holds only the previous auto-select result; seat states and the
/// selection itself belong to the [`SeatStore`] passed in.
#[derive(Debug, Clone, Default)]
pub struct SeatPicker {
    last_auto_selected: Vec<SeatId>,
}

impl SeatPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous auto-select result
    pub fn last_auto_selected(&self) -> &[SeatId] {
        &self.last_auto_selected
    }

    /// Forget the previous auto-select result (layout changed)
    pub fn reset(&mut self) {
        self.last_auto_selected.clear();
    }

    /// Handle a tap at `point`
    ///
    /// With `multi` held the tapped seat is toggled, otherwise it becomes the
    /// only selected seat. Returns the tapped seat, `None` on a miss.
    pub fn tap(
        &self,
        layout: &LayoutConfig,
        store: &mut SeatStore,
        point: Vec2,
        multi: bool,
    ) -> Option<SeatId> {
        let id = seat_at(layout, point)?;
        if multi {
            let selected = store.toggle_selected(id);
            log::debug!("Toggled seat {id} (selected: {selected})");
        } else {
            store.select_only(id);
            log::debug!("Selected seat {id}");
        }
        Some(id)
    }

    /// Pick one seat for a person of `age`
    pub fn auto_select_individual(
        &mut self,
        layout: &LayoutConfig,
        store: &mut SeatStore,
        age: u32,
    ) -> Result<SeatId> {
        let candidates: Vec<SeatId> = eligible_rows(layout, &[age])
            .into_iter()
            .flat_map(|row| layout.row_ids(row))
            .filter(|&id| store.is_available(id) && !store.is_selected(id))
            .collect();

        let pick = candidates
            .iter()
            .find(|&&id| !self.last_auto_selected.contains(&id))
            .or(candidates.first())
            .copied()
            .ok_or(BookingError::NoSeatAvailable)?;

        store.select_only(pick);
        self.last_auto_selected = vec![pick];
        log::debug!("Auto-selected seat {pick} for age {age}");
        Ok(pick)
    }

    /// Pick a contiguous block in one row for a group with the given ages
    pub fn auto_select_group(
        &mut self,
        layout: &LayoutConfig,
        store: &mut SeatStore,
        ages: &[u32],
    ) -> Result<Vec<SeatId>> {
        let size = ages.len();
        if !(1..=MAX_GROUP_SIZE).contains(&size) {
            return Err(BookingError::InvalidGroupSize { max: MAX_GROUP_SIZE });
        }

        let block = self
            .find_block(layout, store, ages)
            .or_else(|| self.repeatable_last_block(store, size))
            .ok_or(BookingError::NoSeatAvailable)?;

        store.select_all(&block);
        self.last_auto_selected = block.clone();
        log::debug!("Auto-selected block of {size} starting at {}", block[0]);
        Ok(block)
    }

    /// First fresh block, scanning rows ascending then start seat ascending
    fn find_block(&self, layout: &LayoutConfig, store: &SeatStore, ages: &[u32]) -> Option<Vec<SeatId>> {
        let size = ages.len() as u32;
        if size > layout.seats_per_row {
            return None;
        }
        eligible_rows(layout, ages).into_iter().find_map(|row| {
            (1..=layout.seats_per_row - size + 1).find_map(|start| {
                let block: Vec<SeatId> = (start..start + size).map(|seat| SeatId::new(row, seat)).collect();
                block
                    .iter()
                    .all(|&id| store.is_available(id) && !self.last_auto_selected.contains(&id))
                    .then_some(block)
            })
        })
    }

    /// The previous block, if it has the right size and is still free
    fn repeatable_last_block(&self, store: &SeatStore, size: usize) -> Option<Vec<SeatId>> {
        let last = &self.last_auto_selected;
        (last.len() == size && last.iter().all(|&id| store.is_available(id))).then(|| last.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::seat_position;
    use crate::seats::SeatState;
    use crate::settings::HallSize;

    fn setup() -> (LayoutConfig, SeatStore, SeatPicker) {
        let layout = LayoutConfig::for_hall(HallSize::Medium, 1000.0, 700.0);
        let store = SeatStore::new(&layout);
        (layout, store, SeatPicker::new())
    }

    fn occupy_row(store: &mut SeatStore, layout: &LayoutConfig, row: u32) {
        for id in layout.row_ids(row) {
            store.transition(id, &[SeatState::Available], SeatState::Occupied);
        }
    }

    #[test]
    fn test_tap_single_select() {
        let (layout, mut store, picker) = setup();
        let target = SeatId::new(3, 7);
        let pos = seat_position(&layout, target).pos;

        store.select_only(SeatId::new(1, 1));
        assert_eq!(picker.tap(&layout, &mut store, pos, false), Some(target));
        assert_eq!(store.selection().as_slice(), &[target]);
    }

    #[test]
    fn test_tap_multi_toggles() {
        let (layout, mut store, picker) = setup();
        let a = SeatId::new(2, 2);
        let b = SeatId::new(2, 3);
        let pos_a = seat_position(&layout, a).pos;
        let pos_b = seat_position(&layout, b).pos;

        picker.tap(&layout, &mut store, pos_a, false);
        picker.tap(&layout, &mut store, pos_b, true);
        assert_eq!(store.selection().as_slice(), &[a, b]);
        picker.tap(&layout, &mut store, pos_a, true);
        assert_eq!(store.selection().as_slice(), &[b]);
    }

    #[test]
    fn test_tap_miss_is_noop() {
        let (layout, mut store, picker) = setup();
        store.select_only(SeatId::new(4, 4));
        assert_eq!(picker.tap(&layout, &mut store, Vec2::new(-100.0, -100.0), false), None);
        assert_eq!(store.selection().as_slice(), &[SeatId::new(4, 4)]);
    }

    #[test]
    fn test_tap_selects_sold_seat() {
        // Selecting a sold seat is allowed so it can be refunded
        let (layout, mut store, picker) = setup();
        let id = SeatId::new(5, 5);
        store.transition(id, &[SeatState::Available], SeatState::Occupied);
        picker.tap(&layout, &mut store, seat_position(&layout, id).pos, false);
        assert!(store.is_selected(id));
    }

    #[test]
    fn test_row_rules() {
        let (layout, _, _) = setup();
        assert_eq!(eligible_rows(&layout, &[10]), (4..=10).collect::<Vec<_>>());
        assert_eq!(eligible_rows(&layout, &[70]), (1..=7).collect::<Vec<_>>());
        assert_eq!(eligible_rows(&layout, &[15, 60]), (1..=10).collect::<Vec<_>>());
        assert_eq!(eligible_rows(&layout, &[10, 70]), (4..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_row_rules_tiny_hall() {
        let mut layout = LayoutConfig::for_hall(HallSize::Small, 1000.0, 700.0);
        layout.rows = 3;
        assert!(eligible_rows(&layout, &[10]).is_empty());
        assert!(eligible_rows(&layout, &[70]).is_empty());
    }

    #[test]
    fn test_auto_select_child_skips_front_rows() {
        let (layout, mut store, mut picker) = setup();
        let pick = picker.auto_select_individual(&layout, &mut store, 10).unwrap();
        assert_eq!(pick, SeatId::new(4, 1));
        assert!((4..=10).contains(&pick.row));
        assert_eq!(store.selection().as_slice(), &[pick]);
    }

    #[test]
    fn test_auto_select_varies_on_repeat() {
        let (layout, mut store, mut picker) = setup();
        let first = picker.auto_select_individual(&layout, &mut store, 30).unwrap();
        let second = picker.auto_select_individual(&layout, &mut store, 30).unwrap();
        assert_ne!(first, second);
        assert_eq!(picker.last_auto_selected(), &[second]);
    }

    #[test]
    fn test_auto_select_falls_back_to_first_candidate() {
        let (layout, mut store, mut picker) = setup();
        for row in 1..=10 {
            occupy_row(&mut store, &layout, row);
        }
        let last = SeatId::new(10, 20);
        store.transition(last, &[SeatState::Occupied], SeatState::Available);

        assert_eq!(picker.auto_select_individual(&layout, &mut store, 30), Ok(last));
        // The previous pick is the only candidate left
        store.clear_selection();
        assert_eq!(picker.auto_select_individual(&layout, &mut store, 30), Ok(last));
    }

    #[test]
    fn test_auto_select_reports_full_house() {
        let (layout, mut store, mut picker) = setup();
        for row in 4..=10 {
            occupy_row(&mut store, &layout, row);
        }
        assert_eq!(
            picker.auto_select_individual(&layout, &mut store, 10),
            Err(BookingError::NoSeatAvailable)
        );
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_group_of_seniors_avoids_back_rows() {
        let (layout, mut store, mut picker) = setup();
        let block = picker.auto_select_group(&layout, &mut store, &[70, 70, 70]).unwrap();
        assert_eq!(block.len(), 3);
        let row = block[0].row;
        assert!((1..=7).contains(&row));
        assert!(block.iter().all(|id| id.row == row));
        assert!(block.windows(2).all(|w| w[1].seat == w[0].seat + 1));
        assert_eq!(store.selection().as_slice(), block.as_slice());
    }

    #[test]
    fn test_group_skips_blocked_starts() {
        let (layout, mut store, mut picker) = setup();
        store.transition(SeatId::new(1, 2), &[SeatState::Available], SeatState::Reserved);
        let block = picker.auto_select_group(&layout, &mut store, &[30, 30]).unwrap();
        assert_eq!(block, vec![SeatId::new(1, 3), SeatId::new(1, 4)]);
    }

    #[test]
    fn test_group_repeat_picks_disjoint_block() {
        let (layout, mut store, mut picker) = setup();
        let first = picker.auto_select_group(&layout, &mut store, &[30, 30]).unwrap();
        let second = picker.auto_select_group(&layout, &mut store, &[30, 30]).unwrap();
        assert!(second.iter().all(|id| !first.contains(id)));
    }

    #[test]
    fn test_group_falls_back_to_previous_block() {
        let (layout, mut store, mut picker) = setup();
        for row in 1..=10 {
            occupy_row(&mut store, &layout, row);
        }
        let only = [SeatId::new(2, 5), SeatId::new(2, 6)];
        for id in only {
            store.transition(id, &[SeatState::Occupied], SeatState::Available);
        }
        assert_eq!(picker.auto_select_group(&layout, &mut store, &[30, 30]), Ok(only.to_vec()));
        assert_eq!(picker.auto_select_group(&layout, &mut store, &[30, 30]), Ok(only.to_vec()));
    }

    #[test]
    fn test_group_larger_than_row() {
        let (layout, mut store, mut picker) = setup();
        let ages = vec![30; 21];
        assert_eq!(
            picker.auto_select_group(&layout, &mut store, &ages),
            Err(BookingError::InvalidGroupSize { max: MAX_GROUP_SIZE })
        );
        assert_eq!(
            picker.auto_select_group(&layout, &mut store, &[]),
            Err(BookingError::InvalidGroupSize { max: MAX_GROUP_SIZE })
        );
    }

    #[test]
    fn test_group_with_child_and_senior() {
        let (layout, mut store, mut picker) = setup();
        let block = picker.auto_select_group(&layout, &mut store, &[8, 72]).unwrap();
        assert_eq!(block[0].row, 4);
    }
}
