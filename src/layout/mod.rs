//! Seat map layout
//!
//! Pure data and math: no state, no rendering, no platform dependencies.

pub mod config;
pub mod geometry;

pub use config::LayoutConfig;
pub use geometry::{SeatPosition, seat_at, seat_position};
