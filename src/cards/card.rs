//! Card entity - runtime card state on the table.
//!
//! A `Card` tracks its identity, its owning group (a `GroupId`
//! back-reference, never ownership), its world placement and the transient
//! selection/drag state. Cross-card transitions (moving a selection,
//! resolving a drop) need the groups as well and live on `Table`; the
//! methods here only touch the card itself.

use kurbo::{Point, Rect, Size, Vec2};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::code::{Rank, Suit};
use crate::core::ids::{CardId, GroupId};

/// Cards on a table, keyed by ID.
pub type CardMap = FxHashMap<CardId, Card>;

/// Interaction state of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Resting in its group.
    Idle,
    /// Lifted and registered in its group's selection.
    Selected,
    /// Part of the active drag session.
    Dragging,
}

/// Where a card was before the current drag started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreDrag {
    /// World position at drag-begin.
    pub position: Point,
    /// Owning group at drag-begin.
    pub owner: GroupId,
}

/// A card on the table.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    id: CardId,
    code: String,
    suit: Suit,
    rank: Rank,

    owner: GroupId,
    selected: bool,

    position: Point,
    depth: f64,
    draw_order: u32,

    visual_offset: Vec2,
    drag_offset: Option<Vec2>,
    pre_drag: Option<PreDrag>,
    last_hovered: Option<GroupId>,
}

impl Card {
    /// Create an idle card owned by `owner`.
    pub fn new(id: CardId, code: impl Into<String>, suit: Suit, rank: Rank, owner: GroupId) -> Self {
        Self {
            id,
            code: code.into(),
            suit,
            rank,
            owner,
            selected: false,
            position: Point::ORIGIN,
            depth: 0.0,
            draw_order: 0,
            visual_offset: Vec2::ZERO,
            drag_offset: None,
            pre_drag: None,
            last_hovered: None,
        }
    }

    /// Card ID.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The code this card was spawned from.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Decoded suit.
    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Decoded rank (`Rank::INVALID` for unparseable codes).
    #[must_use]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The group whose member sequence holds this card.
    #[must_use]
    pub fn owner(&self) -> GroupId {
        self.owner
    }

    /// Whether the card is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the card is part of the active drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> CardState {
        if self.drag_offset.is_some() {
            CardState::Dragging
        } else if self.selected {
            CardState::Selected
        } else {
            CardState::Idle
        }
    }

    /// World position of the card root.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Depth assigned by the last layout (smaller is further back).
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Draw order assigned by the last layout (1-based).
    #[must_use]
    pub fn draw_order(&self) -> u32 {
        self.draw_order
    }

    /// Lift applied to the visual while selected.
    #[must_use]
    pub fn visual_offset(&self) -> Vec2 {
        self.visual_offset
    }

    /// Offset from the pointer, while dragging.
    #[must_use]
    pub fn drag_offset(&self) -> Option<Vec2> {
        self.drag_offset
    }

    /// Placement captured when the current drag began.
    #[must_use]
    pub fn pre_drag(&self) -> Option<PreDrag> {
        self.pre_drag
    }

    /// Last group this card's collider entered.
    #[must_use]
    pub fn last_hovered(&self) -> Option<GroupId> {
        self.last_hovered
    }

    /// Position of this card relative to a group origin.
    #[must_use]
    pub fn local_position(&self, origin: Point) -> Point {
        (self.position - origin).to_point()
    }

    /// The card's visual rectangle, including the selection lift.
    #[must_use]
    pub fn visual_rect(&self, size: Size) -> Rect {
        Rect::from_center_size(self.position + self.visual_offset, size)
    }

    pub(crate) fn select(&mut self, lift: Vec2) {
        self.selected = true;
        self.visual_offset = lift;
    }

    pub(crate) fn deselect(&mut self) {
        self.selected = false;
        self.visual_offset = Vec2::ZERO;
    }

    /// Capture pre-drag placement and the offset from the pointer.
    ///
    /// Hover memory starts empty for every drag.
    pub(crate) fn begin_drag(&mut self, pointer: Point) {
        self.pre_drag = Some(PreDrag {
            position: self.position,
            owner: self.owner,
        });
        self.drag_offset = Some(self.position - pointer);
        self.last_hovered = None;
    }

    /// Back to idle: no selection, no lift, no drag state, no hover memory.
    pub(crate) fn reset(&mut self) {
        self.selected = false;
        self.visual_offset = Vec2::ZERO;
        self.drag_offset = None;
        self.pre_drag = None;
        self.last_hovered = None;
    }

    pub(crate) fn set_owner(&mut self, owner: GroupId) {
        self.owner = owner;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn place(&mut self, position: Point, depth: f64, draw_order: u32) {
        self.position = position;
        self.depth = depth;
        self.draw_order = draw_order;
    }

    pub(crate) fn set_last_hovered(&mut self, group: Option<GroupId>) {
        self.last_hovered = group;
    }
}
