//! Reservation records and the append-only reservation log

use serde::{Deserialize, Serialize};

use super::Party;
use crate::seats::SeatId;

/// Lifecycle status of a reservation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Reserved,
    Purchased,
    /// Every seat was released by a cancellation
    Cancelled,
    /// Every seat was released by a refund
    Refunded,
}

/// One booking, individual or group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(flatten)]
    pub party: Party,
    /// Seats still held by this record, in selection order
    pub seats: Vec<SeatId>,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// Unix timestamp (ms) of creation
    pub timestamp: f64,
    /// Unix timestamp (ms) of the reserved -> purchased confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_timestamp: Option<f64>,
    /// Seats given back by cancel or refund
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub released_seats: Vec<SeatId>,
}

impl ReservationRecord {
    pub fn new(
        party: Party,
        seats: Vec<SeatId>,
        status: ReservationStatus,
        price: Option<u32>,
        timestamp: f64,
    ) -> Self {
        Self {
            party,
            seats,
            status,
            price,
            timestamp,
            purchase_timestamp: None,
            released_seats: Vec::new(),
        }
    }

    pub fn overlaps(&self, seats: &[SeatId]) -> bool {
        self.seats.iter().any(|s| seats.contains(s))
    }
}

/// In-memory copy of the persisted reservation log
///
/// Records are appended and updated in place, never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationLog {
    records: Vec<ReservationRecord>,
}

impl ReservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ReservationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ReservationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: ReservationRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Seats held by records still in the reserved status
    pub fn reserved_seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.records
            .iter()
            .filter(|r| r.status == ReservationStatus::Reserved)
            .flat_map(|r| r.seats.iter().copied())
    }

    /// Mark the reserved records holding `seats` as purchased
    ///
    /// A record confirmed only in part is split: the confirmed seats move to
    /// a new purchased record priced for those seats alone, and the rest stay
    /// reserved. Returns the number of records confirmed.
    pub fn confirm(&mut self, seats: &[SeatId], unit_price: u32, now: f64) -> usize {
        let mut split = Vec::new();
        let mut updated = 0;
        for record in &mut self.records {
            if record.status != ReservationStatus::Reserved || !record.overlaps(seats) {
                continue;
            }
            let (confirmed, kept): (Vec<SeatId>, Vec<SeatId>) =
                record.seats.iter().copied().partition(|s| seats.contains(s));
            let price = Some(confirmed.len() as u32 * unit_price);
            if kept.is_empty() {
                record.status = ReservationStatus::Purchased;
                record.purchase_timestamp = Some(now);
                record.price = price;
            } else {
                let party = record.party.split_off(&confirmed);
                let mut sold = ReservationRecord::new(
                    party,
                    confirmed,
                    ReservationStatus::Purchased,
                    price,
                    record.timestamp,
                );
                sold.purchase_timestamp = Some(now);
                record.seats = kept;
                split.push(sold);
            }
            updated += 1;
        }
        self.records.extend(split);
        updated
    }

    /// Move `seats` out of records in status `from`
    ///
    /// A record left holding no seats takes the status `emptied`.
    /// Returns the number of records touched.
    pub fn release(
        &mut self,
        seats: &[SeatId],
        from: ReservationStatus,
        emptied: ReservationStatus,
    ) -> usize {
        let mut touched = 0;
        for record in &mut self.records {
            if record.status != from || !record.overlaps(seats) {
                continue;
            }
            let (released, kept): (Vec<SeatId>, Vec<SeatId>) =
                record.seats.iter().copied().partition(|s| seats.contains(s));
            record.seats = kept;
            record.released_seats.extend(released);
            if record.seats.is_empty() {
                record.status = emptied;
            }
            touched += 1;
        }
        touched
    }
}
