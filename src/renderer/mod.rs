//! Seat map rendering
//!
//! Draws through a small immediate-mode [`DrawingSurface`] so any 2D backend
//! (HTML canvas, a command recorder, a terminal grid) can display the map.
//! Rendering only reads state and is idempotent.

pub mod commands;

use glam::Vec2;

pub use commands::{CommandBuffer, DrawCommand};

use crate::consts::{ROW_LABEL_OFFSET, SEAT_BORDER_WIDTH};
use crate::layout::{LayoutConfig, seat_position};
use crate::seats::{SeatId, SeatState, SeatStore};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Build from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// CSS `#rrggbb` form
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Seat colors
pub mod palette {
    use super::Color;

    pub const AVAILABLE_FILL: Color = Color::hex(0x28a745);
    pub const AVAILABLE_BORDER: Color = Color::hex(0x1e7e34);
    /// Shared by reserved and selected seats
    pub const HELD_FILL: Color = Color::hex(0xffc107);
    pub const HELD_BORDER: Color = Color::hex(0xd39e00);
    pub const OCCUPIED_FILL: Color = Color::hex(0xdc3545);
    pub const OCCUPIED_BORDER: Color = Color::hex(0xa71e2a);
    pub const SEAT_NUMBER: Color = Color::hex(0xffffff);
    pub const ROW_LABEL: Color = Color::hex(0x333333);
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font, color and alignment of a text draw (vertically centered)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    /// CSS font shorthand
    pub font: &'static str,
    pub align: TextAlign,
}

pub const SEAT_NUMBER_STYLE: TextStyle = TextStyle {
    color: palette::SEAT_NUMBER,
    font: "bold 10px Arial",
    align: TextAlign::Center,
};

pub const ROW_LABEL_STYLE: TextStyle = TextStyle {
    color: palette::ROW_LABEL,
    font: "bold 14px Arial",
    align: TextAlign::Center,
};

/// Immediate-mode 2D drawing context
pub trait DrawingSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Push the current transform
    fn save(&mut self);
    /// Pop the transform pushed by the matching `save`
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);
    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle);
}

/// Fill and border color of a seat
///
/// Sold and reserved seats keep their color even while selected.
pub fn seat_colors(state: SeatState, selected: bool) -> (Color, Color) {
    match state {
        SeatState::Occupied => (palette::OCCUPIED_FILL, palette::OCCUPIED_BORDER),
        SeatState::Reserved => (palette::HELD_FILL, palette::HELD_BORDER),
        SeatState::Available if selected => (palette::HELD_FILL, palette::HELD_BORDER),
        SeatState::Available => (palette::AVAILABLE_FILL, palette::AVAILABLE_BORDER),
    }
}

/// Draw the whole seat map
pub fn render(surface: &mut dyn DrawingSurface, layout: &LayoutConfig, store: &SeatStore) {
    surface.clear_rect(0.0, 0.0, layout.canvas_width, layout.canvas_height);

    for id in layout.seat_ids() {
        draw_seat(surface, layout, store, id);
    }

    draw_row_labels(surface, layout);
}

fn draw_seat(surface: &mut dyn DrawingSurface, layout: &LayoutConfig, store: &SeatStore, id: SeatId) {
    let position = seat_position(layout, id);
    let state = store.get(id).unwrap_or_default();
    let (fill, border) = seat_colors(state, store.is_selected(id));

    surface.save();
    surface.translate(position.pos.x, position.pos.y);
    surface.fill_circle(Vec2::ZERO, layout.seat_radius, fill);
    surface.stroke_circle(Vec2::ZERO, layout.seat_radius, border, SEAT_BORDER_WIDTH);
    surface.fill_text(&id.seat.to_string(), Vec2::ZERO, SEAT_NUMBER_STYLE);
    surface.restore();
}

fn draw_row_labels(surface: &mut dyn DrawingSurface, layout: &LayoutConfig) {
    let offset = Vec2::new(ROW_LABEL_OFFSET, 0.0);
    for row in 1..=layout.rows {
        let label = format!("Row {row}");
        let left = seat_position(layout, SeatId::new(row, 1)).pos;
        let right = seat_position(layout, SeatId::new(row, layout.seats_per_row)).pos;
        surface.fill_text(&label, left - offset, ROW_LABEL_STYLE);
        surface.fill_text(&label, right + offset, ROW_LABEL_STYLE);
    }
}
