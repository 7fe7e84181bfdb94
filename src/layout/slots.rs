//! Slot computation.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::core::config::{GroupLayout, Pivot};

/// Depth decrement between consecutive slots.
pub const DEPTH_STEP: f64 = 0.01;

/// One candidate position in a group, in group-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Local position relative to the group origin.
    pub position: Point,
    /// Depth; decreases with index so later slots draw on top.
    pub depth: f64,
    /// 1-based draw order.
    pub draw_order: u32,
}

/// Offset of slot 0 from the group origin.
#[must_use]
pub fn pivot_offset(layout: &GroupLayout) -> Vec2 {
    let last = layout.max_slots.saturating_sub(1) as f64;
    let span = layout.slot_spacing * last;
    match layout.pivot {
        Pivot::Left => Vec2::ZERO,
        Pivot::Right => -span,
        Pivot::Center => -span * 0.5,
    }
}

/// Slot `index`, without clamping to `max_slots`.
#[must_use]
pub fn slot_at(layout: &GroupLayout, index: usize) -> Slot {
    let position = (pivot_offset(layout) + layout.slot_spacing * index as f64).to_point();
    Slot {
        position,
        depth: -(index as f64) * DEPTH_STEP,
        draw_order: u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1)),
    }
}

/// All `max_slots` slots of a layout, in order.
#[must_use]
pub fn slots_for(layout: &GroupLayout) -> Vec<Slot> {
    (0..layout.max_slots).map(|i| slot_at(layout, i)).collect()
}

/// Slot index for the member at `index`, clamped to the last slot.
#[must_use]
pub fn slot_index(layout: &GroupLayout, index: usize) -> usize {
    index.min(layout.max_slots.saturating_sub(1))
}

/// Where the next appended member goes: slot `member_count`, clamped to the
/// last slot when the group is over-full.
#[must_use]
pub fn next_free_position(layout: &GroupLayout, member_count: usize) -> Point {
    slot_at(layout, slot_index(layout, member_count)).position
}

/// Bounds derived from member count and slot spacing, for groups without an
/// explicit visual extent.
///
/// Width covers `min(max(count, 1), max_slots)` slots; the rectangle sits on
/// the side of the origin the pivot grows toward.
#[must_use]
pub fn fallback_bounds(layout: &GroupLayout, origin: Point, member_count: usize) -> Rect {
    let filled = member_count.max(1).min(layout.max_slots);
    let width = filled as f64 * layout.slot_spacing.x.abs();
    let offset_x = match layout.pivot {
        Pivot::Left => width / 2.0,
        Pivot::Center => 0.0,
        Pivot::Right => -width / 2.0,
    };
    Rect::from_center_size(
        origin + Vec2::new(offset_x, 0.0),
        Size::new(width, layout.fallback_height),
    )
}
