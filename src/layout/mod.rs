//! Layout engine: slot positions and derived bounds for groups.
//!
//! Everything here is a pure function of a `GroupLayout` (plus a member
//! count or origin where noted). Calling any of them twice with the same
//! input yields the same output.
//!
//! ```
//! use card_table::core::GroupLayout;
//! use card_table::layout::{slots_for, next_free_position};
//! use kurbo::{Point, Vec2};
//!
//! let layout = GroupLayout::new(Vec2::new(1.0, 0.0), 3);
//! let slots = slots_for(&layout);
//!
//! assert_eq!(slots.len(), 3);
//! assert_eq!(slots[2].position, Point::new(2.0, 0.0));
//! assert_eq!(slots[2].draw_order, 3);
//!
//! // Over-full groups stack on the last slot
//! assert_eq!(next_free_position(&layout, 10), Point::new(2.0, 0.0));
//! ```

mod slots;

pub use slots::{
    fallback_bounds, next_free_position, pivot_offset, slot_at, slot_index, slots_for, Slot,
    DEPTH_STEP,
};
