//! Seat map layout parameters

use serde::{Deserialize, Serialize};

use crate::consts::SEAT_RADIUS;
use crate::error::{BookingError, Result};
use crate::seats::SeatId;
use crate::settings::HallSize;

/// Dimensions and arc parameters of the seat map
///
/// Any change to these values invalidates every seat id, so the owning
/// session rebuilds its seat store whenever a new layout is installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub rows: u32,
    pub seats_per_row: u32,
    pub seat_radius: f32,
    /// Gap between neighbouring rows (added to the seat diameter)
    pub row_spacing: f32,
    /// Radius of the back row's arc
    pub arc_radius: f32,
    pub arc_center_x: f32,
    pub arc_center_y: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl LayoutConfig {
    /// Build the layout for a hall preset on a canvas of the given size
    ///
    /// The arc center sits horizontally centered and below the canvas.
    pub fn for_hall(hall: HallSize, canvas_width: f32, canvas_height: f32) -> Self {
        let preset = hall.preset();
        Self {
            rows: preset.rows,
            seats_per_row: preset.seats_per_row,
            seat_radius: SEAT_RADIUS,
            row_spacing: preset.row_spacing,
            arc_radius: preset.arc_radius,
            arc_center_x: canvas_width / 2.0,
            arc_center_y: canvas_height + preset.center_offset_y,
            canvas_width,
            canvas_height,
        }
    }

    /// Check the invariants the geometry relies on
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(BookingError::InvalidLayout("at least one row is required"));
        }
        if self.seats_per_row < 2 {
            return Err(BookingError::InvalidLayout("at least two seats per row are required"));
        }
        if self.seat_radius <= 0.0 || self.seat_radius.is_nan() {
            return Err(BookingError::InvalidLayout("seat radius must be positive"));
        }
        Ok(())
    }

    /// Total number of seats
    pub fn capacity(&self) -> u32 {
        self.rows * self.seats_per_row
    }

    /// Whether `id` addresses a seat in this layout
    pub fn contains(&self, id: SeatId) -> bool {
        (1..=self.rows).contains(&id.row) && (1..=self.seats_per_row).contains(&id.seat)
    }

    /// Every seat id in row-major order (row ascending, then seat ascending)
    pub fn seat_ids(&self) -> impl Iterator<Item = SeatId> + '_ {
        (1..=self.rows)
            .flat_map(move |row| (1..=self.seats_per_row).map(move |seat| SeatId::new(row, seat)))
    }

    /// Seat ids of a single row, left to right
    pub fn row_ids(&self, row: u32) -> impl Iterator<Item = SeatId> {
        (1..=self.seats_per_row).map(move |seat| SeatId::new(row, seat))
    }
}
