//! Seat identity, state and selection

pub mod id;
pub mod store;

pub use id::{ParseSeatIdError, SeatId};
pub use store::{SeatState, SeatStore, Selection};
