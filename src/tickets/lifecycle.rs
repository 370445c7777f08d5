//! Ticket lifecycle
//!
//! Every operation works on the current selection and either commits fully
//! or returns an error without touching anything. Reserve and purchase
//! reject the whole batch if one seat is ineligible; confirm, cancel and
//! refund skip ineligible seats and act on the rest.

use super::{PartyInfo, ReservationLog, ReservationRecord, ReservationStatus};
use crate::error::{BookingError, Result};
use crate::seats::{SeatId, SeatState, SeatStore};
use crate::settings::Settings;

/// What a committed operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    Reserved,
    Purchased,
    Confirmed,
    Cancelled,
    Refunded,
}

/// Result of a committed lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub kind: ReceiptKind,
    /// Seats whose state changed
    pub seats: Vec<SeatId>,
    /// Amount charged or refunded
    pub amount: u32,
}

impl Receipt {
    /// Message for the user
    pub fn message(&self, settings: &Settings) -> String {
        let amount = settings.format_price(self.amount);
        let count = self.seats.len();
        match self.kind {
            ReceiptKind::Reserved => "Seats reserved successfully!".to_string(),
            ReceiptKind::Purchased => format!("Purchase complete! Total: {amount}"),
            ReceiptKind::Confirmed => {
                format!("Purchase confirmed! {count} ticket(s), total: {amount}")
            }
            ReceiptKind::Cancelled => format!("Reservation cancelled for {count} seat(s)"),
            ReceiptKind::Refunded => format!("Refund complete! Amount refunded: {amount}"),
        }
    }
}

/// Applies lifecycle transitions to a seat store and reservation log
#[derive(Debug, Clone, Copy)]
pub struct TicketDesk {
    pub unit_price: u32,
}

impl TicketDesk {
    pub fn new(unit_price: u32) -> Self {
        Self { unit_price }
    }

    fn price(&self, seats: usize) -> u32 {
        seats as u32 * self.unit_price
    }

    /// Check that something is selected and every selected seat is free
    pub fn check_selection(store: &SeatStore) -> Result<Vec<SeatId>> {
        let selection = store.selection();
        if selection.is_empty() {
            return Err(BookingError::EmptySelection);
        }
        if let Some(taken) = selection.iter().find(|&id| !store.is_available(id)) {
            return Err(BookingError::SeatUnavailable(taken));
        }
        Ok(selection.as_slice().to_vec())
    }

    /// Check that a new booking may proceed and return the seats it covers
    fn bookable_selection(&self, store: &SeatStore, party: &PartyInfo) -> Result<Vec<SeatId>> {
        let seats = Self::check_selection(store)?;
        party.validate(seats.len())?;
        Ok(seats)
    }

    /// Hold the selected seats as reserved
    pub fn reserve(
        &self,
        store: &mut SeatStore,
        log: &mut ReservationLog,
        party: &PartyInfo,
        now: f64,
    ) -> Result<Receipt> {
        let seats = self.bookable_selection(store, party)?;
        for &id in &seats {
            store.transition(id, &[SeatState::Available], SeatState::Reserved);
        }
        log.push(ReservationRecord::new(
            party.to_party(&seats),
            seats.clone(),
            ReservationStatus::Reserved,
            None,
            now,
        ));
        store.clear_selection();

        log::info!("Reserved {} seat(s)", seats.len());
        Ok(Receipt {
            kind: ReceiptKind::Reserved,
            seats,
            amount: 0,
        })
    }

    /// Sell the selected seats without a prior reservation
    pub fn purchase(
        &self,
        store: &mut SeatStore,
        log: &mut ReservationLog,
        party: &PartyInfo,
        now: f64,
    ) -> Result<Receipt> {
        let seats = self.bookable_selection(store, party)?;
        for &id in &seats {
            store.transition(id, &[SeatState::Available], SeatState::Occupied);
        }
        let amount = self.price(seats.len());
        log.push(ReservationRecord::new(
            party.to_party(&seats),
            seats.clone(),
            ReservationStatus::Purchased,
            Some(amount),
            now,
        ));
        store.clear_selection();

        log::info!("Sold {} seat(s) for {}", seats.len(), amount);
        Ok(Receipt {
            kind: ReceiptKind::Purchased,
            seats,
            amount,
        })
    }

    /// Apply `from -> to` to each selected seat, skipping the rest
    fn transition_selected(
        store: &mut SeatStore,
        from: SeatState,
        to: SeatState,
    ) -> Result<Vec<SeatId>> {
        if store.selection().is_empty() {
            return Err(BookingError::EmptySelection);
        }
        let selected: Vec<SeatId> = store.selection().iter().collect();
        Ok(selected
            .into_iter()
            .filter(|&id| store.transition(id, &[from], to))
            .collect())
    }

    /// Turn selected reservations into sales
    pub fn confirm_purchase(
        &self,
        store: &mut SeatStore,
        log: &mut ReservationLog,
        now: f64,
    ) -> Result<Receipt> {
        let seats = Self::transition_selected(store, SeatState::Reserved, SeatState::Occupied)?;
        if seats.is_empty() {
            return Err(BookingError::NothingToConfirm);
        }
        let records = log.confirm(&seats, self.unit_price, now);
        store.clear_selection();

        log::info!("Confirmed {} seat(s) across {} record(s)", seats.len(), records);
        Ok(Receipt {
            kind: ReceiptKind::Confirmed,
            amount: self.price(seats.len()),
            seats,
        })
    }

    /// Release selected reservations
    pub fn cancel_reservation(
        &self,
        store: &mut SeatStore,
        log: &mut ReservationLog,
    ) -> Result<Receipt> {
        let seats = Self::transition_selected(store, SeatState::Reserved, SeatState::Available)?;
        if seats.is_empty() {
            return Err(BookingError::NothingToCancel);
        }
        log.release(&seats, ReservationStatus::Reserved, ReservationStatus::Cancelled);
        store.clear_selection();

        log::info!("Cancelled {} reserved seat(s)", seats.len());
        Ok(Receipt {
            kind: ReceiptKind::Cancelled,
            seats,
            amount: 0,
        })
    }

    /// Give back selected sold seats
    pub fn refund(&self, store: &mut SeatStore, log: &mut ReservationLog) -> Result<Receipt> {
        let seats = Self::transition_selected(store, SeatState::Occupied, SeatState::Available)?;
        if seats.is_empty() {
            return Err(BookingError::NothingToRefund);
        }
        log.release(&seats, ReservationStatus::Purchased, ReservationStatus::Refunded);
        store.clear_selection();

        let amount = self.price(seats.len());
        log::info!("Refunded {} seat(s) for {}", seats.len(), amount);
        Ok(Receipt {
            kind: ReceiptKind::Refunded,
            seats,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use crate::settings::HallSize;
    use crate::tickets::Party;

    const PRICE: u32 = 45;

    fn setup() -> (TicketDesk, SeatStore, ReservationLog) {
        let layout = LayoutConfig::for_hall(HallSize::Medium, 1000.0, 700.0);
        (TicketDesk::new(PRICE), SeatStore::new(&layout), ReservationLog::new())
    }

    fn ada() -> PartyInfo {
        PartyInfo::individual("Ada", 36)
    }

    #[test]
    fn test_reserve_commits_and_clears_selection() {
        let (desk, mut store, mut log) = setup();
        let id = SeatId::new(5, 1);
        store.select_only(id);

        let receipt = desk.reserve(&mut store, &mut log, &ada(), 1.0).unwrap();
        assert_eq!(receipt.seats, vec![id]);
        assert_eq!(store.get(id), Some(SeatState::Reserved));
        assert!(store.selection().is_empty());
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].status, ReservationStatus::Reserved);
        assert_eq!(log.records()[0].price, None);
    }

    #[test]
    fn test_reserve_requires_selection() {
        let (desk, mut store, mut log) = setup();
        assert_eq!(
            desk.reserve(&mut store, &mut log, &ada(), 1.0),
            Err(BookingError::EmptySelection)
        );
    }

    #[test]
    fn test_reserve_rejects_whole_batch_on_unavailable_seat() {
        let (desk, mut store, mut log) = setup();
        let taken = SeatId::new(1, 2);
        store.transition(taken, &[SeatState::Available], SeatState::Occupied);
        store.select_all(&[SeatId::new(1, 1), taken]);

        let party = PartyInfo::group([("A", 20), ("B", 20)]);
        assert_eq!(
            desk.reserve(&mut store, &mut log, &party, 1.0),
            Err(BookingError::SeatUnavailable(taken))
        );
        assert_eq!(store.get(SeatId::new(1, 1)), Some(SeatState::Available));
        assert_eq!(store.selection().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_invalid_party_changes_nothing() {
        let (desk, mut store, mut log) = setup();
        store.select_only(SeatId::new(2, 2));
        let result = desk.purchase(&mut store, &mut log, &PartyInfo::individual("Ada", 0), 1.0);
        assert_eq!(result, Err(BookingError::InvalidAge));
        assert_eq!(store.count(SeatState::Available), 200);
        assert!(log.is_empty());
    }

    #[test]
    fn test_group_needs_matching_selection() {
        let (desk, mut store, mut log) = setup();
        store.select_only(SeatId::new(2, 2));
        let party = PartyInfo::group([("A", 20), ("B", 20)]);
        assert_eq!(
            desk.reserve(&mut store, &mut log, &party, 1.0),
            Err(BookingError::SeatCountMismatch { expected: 2, selected: 1 })
        );
    }

    #[test]
    fn test_direct_purchase() {
        let (desk, mut store, mut log) = setup();
        store.select_all(&[SeatId::new(3, 3), SeatId::new(3, 4)]);
        let party = PartyInfo::group([("A", 20), ("B", 70)]);

        let receipt = desk.purchase(&mut store, &mut log, &party, 1.0).unwrap();
        assert_eq!(receipt.amount, 2 * PRICE);
        assert_eq!(store.count(SeatState::Occupied), 2);
        let record = &log.records()[0];
        assert_eq!(record.status, ReservationStatus::Purchased);
        assert_eq!(record.price, Some(2 * PRICE));
        assert!(matches!(&record.party, Party::Group { members } if members.len() == 2));
    }

    #[test]
    fn test_confirm_skips_non_reserved_seats() {
        let (desk, mut store, mut log) = setup();
        let id = SeatId::new(5, 1);
        store.select_only(id);
        desk.reserve(&mut store, &mut log, &ada(), 1.0).unwrap();

        store.select_all(&[id, SeatId::new(5, 2)]);
        let receipt = desk.confirm_purchase(&mut store, &mut log, 2.0).unwrap();
        assert_eq!(receipt.seats, vec![id]);
        assert_eq!(receipt.amount, PRICE);
        assert_eq!(store.get(id), Some(SeatState::Occupied));
        assert_eq!(store.get(SeatId::new(5, 2)), Some(SeatState::Available));
        assert_eq!(log.records()[0].status, ReservationStatus::Purchased);
        assert_eq!(log.records()[0].price, Some(PRICE));
    }

    #[test]
    fn test_confirm_with_nothing_reserved() {
        let (desk, mut store, mut log) = setup();
        store.select_only(SeatId::new(1, 1));
        assert_eq!(
            desk.confirm_purchase(&mut store, &mut log, 1.0),
            Err(BookingError::NothingToConfirm)
        );
        assert_eq!(store.selection().len(), 1);
    }

    #[test]
    fn test_cancel_frees_seat_and_releases_record() {
        let (desk, mut store, mut log) = setup();
        let id = SeatId::new(6, 6);
        store.select_only(id);
        desk.reserve(&mut store, &mut log, &ada(), 1.0).unwrap();

        store.select_only(id);
        let receipt = desk.cancel_reservation(&mut store, &mut log).unwrap();
        assert_eq!(receipt.kind, ReceiptKind::Cancelled);
        assert_eq!(store.get(id), Some(SeatState::Available));
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].status, ReservationStatus::Cancelled);
        assert_eq!(log.records()[0].released_seats, vec![id]);
    }

    #[test]
    fn test_cancel_does_not_free_sold_seat() {
        let (desk, mut store, mut log) = setup();
        let id = SeatId::new(6, 6);
        store.select_only(id);
        desk.purchase(&mut store, &mut log, &ada(), 1.0).unwrap();

        store.select_only(id);
        assert_eq!(
            desk.cancel_reservation(&mut store, &mut log),
            Err(BookingError::NothingToCancel)
        );
        assert_eq!(store.get(id), Some(SeatState::Occupied));
    }

    #[test]
    fn test_cancel_skips_non_reserved_seats() {
        let (desk, mut store, mut log) = setup();
        let (held, sold, free) = (SeatId::new(6, 6), SeatId::new(6, 7), SeatId::new(6, 8));
        store.select_only(held);
        desk.reserve(&mut store, &mut log, &ada(), 1.0).unwrap();
        store.select_only(sold);
        desk.purchase(&mut store, &mut log, &ada(), 1.0).unwrap();

        store.select_all(&[held, sold, free]);
        let receipt = desk.cancel_reservation(&mut store, &mut log).unwrap();
        assert_eq!(receipt.seats, vec![held]);
        assert_eq!(store.get(held), Some(SeatState::Available));
        assert_eq!(store.get(sold), Some(SeatState::Occupied));
        assert_eq!(store.get(free), Some(SeatState::Available));
        assert!(store.selection().is_empty());
        assert_eq!(log.records()[0].status, ReservationStatus::Cancelled);
        assert_eq!(log.records()[1].status, ReservationStatus::Purchased);
        assert_eq!(log.records()[1].seats, vec![sold]);
    }

    #[test]
    fn test_refund() {
        let (desk, mut store, mut log) = setup();
        let seats = [SeatId::new(7, 1), SeatId::new(7, 2)];
        store.select_all(&seats);
        desk.purchase(&mut store, &mut log, &PartyInfo::group([("A", 30), ("B", 30)]), 1.0)
            .unwrap();

        store.select_all(&[seats[0], SeatId::new(9, 9)]);
        let receipt = desk.refund(&mut store, &mut log).unwrap();
        assert_eq!(receipt.amount, PRICE);
        assert_eq!(store.get(seats[0]), Some(SeatState::Available));
        assert_eq!(store.get(seats[1]), Some(SeatState::Occupied));
        assert_eq!(log.records()[0].status, ReservationStatus::Purchased);
        assert_eq!(log.records()[0].seats, vec![seats[1]]);
    }

    #[test]
    fn test_refund_unsold_seat() {
        let (desk, mut store, mut log) = setup();
        store.select_only(SeatId::new(1, 1));
        assert_eq!(desk.refund(&mut store, &mut log), Err(BookingError::NothingToRefund));
    }

    #[test]
    fn test_receipt_messages() {
        let settings = Settings::default();
        let receipt = Receipt {
            kind: ReceiptKind::Refunded,
            seats: vec![SeatId::new(1, 1), SeatId::new(1, 2)],
            amount: 90,
        };
        assert_eq!(receipt.message(&settings), "Refund complete! Amount refunded: ¥90");
    }
}
