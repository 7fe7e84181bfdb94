//! Table configuration types.
//!
//! Games configure the table at startup by providing:
//! - `GroupLayout`: slot spacing, capacity and pivot for a group
//! - `ManagerConfig`: where new groups go and how the preview behaves
//! - `TableConfig`: combines the above with card-level settings
//!
//! Every type has a `Default` matching the stock table and builder methods
//! for overriding individual fields.

use std::time::Duration;

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Anchor rule deciding where a group's slot sequence originates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pivot {
    /// Slot 0 sits on the group origin; slots grow away from it.
    #[default]
    Left,
    /// The slot run is centered on the group origin.
    Center,
    /// The last slot sits on the group origin.
    Right,
}

/// Slot configuration for a single group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupLayout {
    /// Offset between consecutive slots.
    pub slot_spacing: Vec2,

    /// Number of candidate slots. Members past the last slot stack on it.
    pub max_slots: usize,

    /// Where the slot run is anchored relative to the group origin.
    pub pivot: Pivot,

    /// Explicit visual extent used for hit-testing, centered on the origin.
    ///
    /// `None` derives the bounds from member count and slot spacing.
    pub extent: Option<Size>,

    /// Height of the derived bounds when no explicit extent is set.
    pub fallback_height: f64,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            slot_spacing: Vec2::new(0.6, 0.0),
            max_slots: 24,
            pivot: Pivot::Left,
            extent: None,
            fallback_height: 2.0,
        }
    }
}

impl GroupLayout {
    /// Create a layout with the given spacing and capacity.
    #[must_use]
    pub fn new(slot_spacing: Vec2, max_slots: usize) -> Self {
        Self {
            slot_spacing,
            max_slots,
            ..Self::default()
        }
    }

    /// Set the pivot.
    #[must_use]
    pub fn with_pivot(mut self, pivot: Pivot) -> Self {
        self.pivot = pivot;
        self
    }

    /// Use an explicit visual extent for hit-testing.
    #[must_use]
    pub fn with_extent(mut self, extent: Size) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Set the height of derived bounds.
    #[must_use]
    pub fn with_fallback_height(mut self, height: f64) -> Self {
        self.fallback_height = height;
        self
    }
}

/// Group manager settings: placement of new groups and preview behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// World position of the first group.
    pub origin: Point,

    /// Distance between a new group and the previously created one.
    pub group_spacing: f64,

    /// Interval between preview outline toggles.
    pub blink_interval: Duration,

    /// Hit-test extent of the preview group.
    pub preview_extent: Size,

    /// Layout template applied to every group the manager creates.
    pub layout: GroupLayout,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(-4.0, -2.0),
            group_spacing: 3.0,
            blink_interval: Duration::from_millis(300),
            preview_extent: Size::new(5.0, 2.0),
            layout: GroupLayout::default(),
        }
    }
}

impl ManagerConfig {
    /// Set the first group's position.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the distance between consecutive groups.
    #[must_use]
    pub fn with_group_spacing(mut self, spacing: f64) -> Self {
        self.group_spacing = spacing;
        self
    }

    /// Set the preview blink interval.
    #[must_use]
    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    /// Set the layout template.
    #[must_use]
    pub fn with_layout(mut self, layout: GroupLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Group manager settings.
    pub manager: ManagerConfig,

    /// Size of a card, used for picking cards under the pointer.
    pub card_size: Size,

    /// Visual lift applied to a selected card.
    pub selection_lift: Vec2,

    /// Per-index offset separating cards dragged together.
    pub stack_step: Vec2,

    /// Code that decodes as a joker.
    pub joker_code: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            manager: ManagerConfig::default(),
            card_size: Size::new(0.5, 0.75),
            selection_lift: Vec2::new(0.0, 0.3),
            stack_step: Vec2::new(0.2, 0.0),
            joker_code: "JK".to_string(),
        }
    }
}

impl TableConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manager configuration.
    #[must_use]
    pub fn with_manager(mut self, manager: ManagerConfig) -> Self {
        self.manager = manager;
        self
    }

    /// Set the layout template for all groups.
    #[must_use]
    pub fn with_layout(mut self, layout: GroupLayout) -> Self {
        self.manager.layout = layout;
        self
    }

    /// Set the card size used for picking.
    #[must_use]
    pub fn with_card_size(mut self, size: Size) -> Self {
        self.card_size = size;
        self
    }

    /// Set the joker code.
    #[must_use]
    pub fn with_joker_code(mut self, code: impl Into<String>) -> Self {
        self.joker_code = code.into();
        self
    }
}
