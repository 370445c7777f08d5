//! Seat identifiers
//!
//! A seat is addressed by its 1-based row and 1-based position within the
//! row. The wire form is `"row-seat"`, e.g. `"3-7"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Composite (row, seat) key
///
/// Ordering is row-major, which is also the layout iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    pub row: u32,
    pub seat: u32,
}

impl SeatId {
    pub const fn new(row: u32, seat: u32) -> Self {
        Self { row, seat }
    }

    /// Human readable label used in the selection summary
    pub fn label(&self) -> String {
        format!("Row {} Seat {}", self.row, self.seat)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.seat)
    }
}

/// Error returned when a string is not a `row-seat` pair of positive integers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed seat id: {0:?}")]
pub struct ParseSeatIdError(pub String);

impl FromStr for SeatId {
    type Err = ParseSeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeatIdError(s.to_string());
        let (row, seat) = s.split_once('-').ok_or_else(err)?;
        let row: u32 = row.trim().parse().map_err(|_| err())?;
        let seat: u32 = seat.trim().parse().map_err(|_| err())?;
        if row == 0 || seat == 0 {
            return Err(err());
        }
        Ok(Self { row, seat })
    }
}

impl TryFrom<String> for SeatId {
    type Error = ParseSeatIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.to_string()
    }
}
