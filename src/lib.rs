//! Cinema Seats - a curved cinema seat map with ticket booking
//!
//! Core modules:
//! - `layout`: Arc geometry and hit testing
//! - `seats`: Seat ids, states and the current selection
//! - `renderer`: Draws the map through a 2D drawing surface
//! - `selection`: Pointer taps and age-aware auto-assignment
//! - `tickets`: Party info, reservation records and lifecycle transitions
//! - `session`: The single owner of all state
//! - `persistence`: Key-value storage of seats and reservations
//! - `platform`: Browser/native platform abstraction

pub mod error;
pub mod layout;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod seats;
pub mod selection;
pub mod session;
pub mod settings;
pub mod tickets;

pub use error::BookingError;
pub use layout::LayoutConfig;
pub use seats::{SeatId, SeatState};
pub use session::{CinemaSession, SelectionSummary, SessionObserver};
pub use settings::{HallSize, Settings};

/// Seat map configuration constants
pub mod consts {
    /// Seat circle radius (pixels)
    pub const SEAT_RADIUS: f32 = 15.0;
    /// Seat outline width (pixels)
    pub const SEAT_BORDER_WIDTH: f32 = 2.0;
    /// Horizontal distance of row labels from the outermost seats
    pub const ROW_LABEL_OFFSET: f32 = 50.0;

    /// Default price of one ticket
    pub const DEFAULT_TICKET_PRICE: u32 = 45;

    /// Valid customer ages
    pub const MIN_AGE: u32 = 1;
    pub const MAX_AGE: u32 = 120;
    /// Below this age the front rows are off limits
    pub const CHILD_MAX_AGE: u32 = 15;
    /// Above this age the back rows are off limits
    pub const SENIOR_MIN_AGE: u32 = 60;
    /// Rows restricted at the front (children) and at the back (seniors)
    pub const RESTRICTED_ROWS: u32 = 3;

    /// Largest group that can book together
    pub const MAX_GROUP_SIZE: usize = 20;

    /// Storage keys
    pub const OCCUPIED_KEY: &str = "occupiedSeats";
    pub const RESERVATIONS_KEY: &str = "cinemaReservations";
    pub const SETTINGS_KEY: &str = "cinemaSettings";
}
