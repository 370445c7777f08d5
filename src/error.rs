//! Booking errors
//!
//! Every variant's `Display` text is the message shown to the user.

use crate::seats::SeatId;

/// Reasons a seat-map operation can be rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Please select seats first")]
    EmptySelection,

    #[error("Seat {0} is not available, please choose again")]
    SeatUnavailable(SeatId),

    #[error("Please choose a ticket type")]
    MissingTicketType,

    #[error("Please enter the customer's name")]
    MissingName,

    #[error("Please enter a valid age (1-120)")]
    InvalidAge,

    #[error("Please enter a valid group size (1-{max})")]
    InvalidGroupSize { max: usize },

    #[error("Please fill in name and age for member {0}")]
    MemberIncomplete(usize),

    #[error("Member {0} has an invalid age, please enter 1-120")]
    MemberInvalidAge(usize),

    #[error("Group size is {declared} but {members} members were entered")]
    MemberCountMismatch { declared: usize, members: usize },

    #[error("Please select exactly {expected} seats ({selected} selected)")]
    SeatCountMismatch { expected: usize, selected: usize },

    #[error("None of the selected seats are reserved")]
    NothingToConfirm,

    #[error("None of the selected seats have a reservation to cancel")]
    NothingToCancel,

    #[error("None of the selected seats have been sold")]
    NothingToRefund,

    #[error("No seat available, please choose manually")]
    NoSeatAvailable,

    #[error("Unsupported hall size: {0}")]
    UnsupportedHall(u32),

    #[error("Invalid layout: {0}")]
    InvalidLayout(&'static str),
}

/// Convenience Result type with BookingError
pub type Result<T> = std::result::Result<T, BookingError>;
