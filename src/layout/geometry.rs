//! Arc geometry for the seat map
//!
//! Rows are concentric arcs around `(arc_center_x, arc_center_y)`. The back
//! row sits on `arc_radius`; each row in front of it is pulled one seat
//! diameter plus `row_spacing` closer to the center. Seats of a row are
//! spread evenly over a fixed angular span centered on straight up.
//!
//! Rendering and hit testing both go through [`seat_position`], so what is
//! drawn is exactly what is clickable.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::LayoutConfig;
use crate::seats::SeatId;

/// Angular span covered by every row (radians)
pub const ROW_ARC_SPAN: f32 = PI / 4.0;

/// Screen position of a seat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatPosition {
    /// Seat center in drawing-surface coordinates
    pub pos: Vec2,
    /// Angle from vertical (radians, negative = left of center)
    pub angle: f32,
}

/// Arc radius of a row
#[inline]
pub fn row_radius(layout: &LayoutConfig, row: u32) -> f32 {
    let rows_behind = layout.rows as f32 - row as f32;
    layout.arc_radius - rows_behind * (layout.seat_radius * 2.0 + layout.row_spacing)
}

/// Angle of a seat within its row
#[inline]
pub fn seat_angle(layout: &LayoutConfig, seat: u32) -> f32 {
    let start = -ROW_ARC_SPAN / 2.0;
    let step = ROW_ARC_SPAN / (layout.seats_per_row - 1) as f32;
    start + (seat as f32 - 1.0) * step
}

/// Convert (radius, angle-from-vertical) around the arc center to screen space
///
/// Screen y grows downward, so "up" is `-cos`.
#[inline]
pub fn arc_to_screen(layout: &LayoutConfig, radius: f32, angle: f32) -> Vec2 {
    Vec2::new(
        layout.arc_center_x + radius * angle.sin(),
        layout.arc_center_y - radius * angle.cos(),
    )
}

/// Position of a seat on the map
///
/// Pure and deterministic; the caller is expected to pass an id within the
/// layout (ids outside it still produce a point, just not a drawn one).
pub fn seat_position(layout: &LayoutConfig, id: SeatId) -> SeatPosition {
    let radius = row_radius(layout, id.row);
    let angle = seat_angle(layout, id.seat);
    SeatPosition {
        pos: arc_to_screen(layout, radius, angle),
        angle,
    }
}

/// Find the seat under a point
///
/// Seats are tested in row-major order and the first circle containing the
/// point wins, which settles overlaps.
pub fn seat_at(layout: &LayoutConfig, point: Vec2) -> Option<SeatId> {
    layout
        .seat_ids()
        .find(|&id| seat_position(layout, id).pos.distance(point) <= layout.seat_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HallSize;
    use proptest::prelude::*;

    fn medium() -> LayoutConfig {
        LayoutConfig::for_hall(HallSize::Medium, 1000.0, 700.0)
    }

    #[test]
    fn test_back_row_uses_full_radius() {
        let layout = medium();
        assert_eq!(row_radius(&layout, 10), 900.0);
        // 9 rows in front of the back row, 2 * 15 + 15 each
        assert_eq!(row_radius(&layout, 1), 900.0 - 9.0 * 45.0);
    }

    #[test]
    fn test_seat_angles_span_symmetric() {
        let layout = medium();
        assert!((seat_angle(&layout, 1) + PI / 8.0).abs() < 1e-6);
        assert!((seat_angle(&layout, 20) - PI / 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_row_is_mirror_symmetric() {
        let layout = medium();
        let left = seat_position(&layout, SeatId::new(4, 1)).pos;
        let right = seat_position(&layout, SeatId::new(4, 20)).pos;
        assert!((left.x - layout.arc_center_x + (right.x - layout.arc_center_x)).abs() < 1e-3);
        assert!((left.y - right.y).abs() < 1e-3);
    }

    #[test]
    fn test_front_rows_are_lower_on_screen() {
        let layout = medium();
        let front = seat_position(&layout, SeatId::new(1, 10)).pos;
        let back = seat_position(&layout, SeatId::new(10, 10)).pos;
        assert!(front.y > back.y);
    }

    #[test]
    fn test_position_is_deterministic() {
        let layout = medium();
        let id = SeatId::new(3, 7);
        assert_eq!(seat_position(&layout, id), seat_position(&layout, id));
    }

    #[test]
    fn test_miss_returns_none() {
        let layout = medium();
        assert_eq!(seat_at(&layout, Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_hit_near_edge() {
        let layout = medium();
        let center = seat_position(&layout, SeatId::new(3, 7)).pos;
        let probe = center + Vec2::new(0.0, layout.seat_radius - 0.5);
        assert_eq!(seat_at(&layout, probe), Some(SeatId::new(3, 7)));
    }

    fn hall_strategy() -> impl Strategy<Value = HallSize> {
        prop_oneof![Just(HallSize::Small), Just(HallSize::Medium), Just(HallSize::Large)]
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

        #[test]
        fn hit_test_recovers_seat_at_its_center(
            hall in hall_strategy(),
            row_seed in 0u32..1000,
            seat_seed in 0u32..1000,
        ) {
            let layout = LayoutConfig::for_hall(hall, 1000.0, 700.0);
            let id = SeatId::new(row_seed % layout.rows + 1, seat_seed % layout.seats_per_row + 1);
            let pos = seat_position(&layout, id).pos;
            prop_assert_eq!(seat_at(&layout, pos), Some(id));
        }
    }
}
