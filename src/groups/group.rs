//! Group entity: an ordered set of member cards plus a selection subset.
//!
//! Member order is draw order. The selection is kept in selection order
//! (not member order) and is always a subset of the members: removing a
//! member also drops it from the selection.
//!
//! Groups never publish messages themselves. Membership changes report what
//! happened (see [`Removal`]) and the caller decides what to publish.

use kurbo::{Point, Rect};

use crate::cards::CardMap;
use crate::core::config::GroupLayout;
use crate::core::ids::{CardId, GroupId};
use crate::layout::{self, Slot};

/// Outcome of removing a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The card was not a member; nothing changed.
    Absent,
    /// The card was removed and members remain.
    Removed,
    /// The card was the last member; the group is now empty.
    Emptied,
}

/// A spatial container of cards.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    id: GroupId,
    name: String,
    origin: Point,
    layout: GroupLayout,

    /// Member cards in draw order.
    members: Vec<CardId>,

    /// Selected members, in selection order.
    selected: Vec<CardId>,

    /// World-space hit-test rectangle.
    bounds: Rect,
}

impl Group {
    /// Create an empty group at `origin`.
    pub fn new(id: GroupId, name: impl Into<String>, origin: Point, layout: GroupLayout) -> Self {
        let mut group = Self {
            id,
            name: name.into(),
            origin,
            layout,
            members: Vec::new(),
            selected: Vec::new(),
            bounds: Rect::ZERO,
        };
        group.refresh_bounds(0);
        group
    }

    /// Group ID.
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World position of the group.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Slot configuration.
    #[must_use]
    pub fn layout(&self) -> &GroupLayout {
        &self.layout
    }

    /// Hit-test rectangle in world space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Members in draw order.
    #[must_use]
    pub fn members(&self) -> &[CardId] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `card` is a member.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.members.contains(&card)
    }

    /// Append a member. Returns `false` if it was already present.
    pub fn add_member(&mut self, card: CardId) -> bool {
        if self.members.contains(&card) {
            return false;
        }
        self.members.push(card);
        true
    }

    /// Remove a member (and its selection entry, if any).
    pub fn remove_member(&mut self, card: CardId) -> Removal {
        let Some(index) = self.members.iter().position(|&c| c == card) else {
            return Removal::Absent;
        };
        self.members.remove(index);
        self.selected.retain(|&c| c != card);

        if self.members.is_empty() {
            Removal::Emptied
        } else {
            Removal::Removed
        }
    }

    /// Add a member to the selection. Non-members and repeats are ignored.
    pub fn add_to_selection(&mut self, card: CardId) -> bool {
        if !self.members.contains(&card) || self.selected.contains(&card) {
            return false;
        }
        self.selected.push(card);
        true
    }

    /// Remove a card from the selection. Returns `false` if it wasn't selected.
    pub fn remove_from_selection(&mut self, card: CardId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&c| c != card);
        self.selected.len() != before
    }

    /// Selected members, in the order they were selected.
    #[must_use]
    pub fn selected_cards(&self) -> &[CardId] {
        &self.selected
    }

    /// Whether `card` is in the selection.
    #[must_use]
    pub fn is_selected(&self, card: CardId) -> bool {
        self.selected.contains(&card)
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Whether a world point falls inside the group's bounds.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Local position the next appended member will take.
    #[must_use]
    pub fn next_free_position(&self) -> Point {
        layout::next_free_position(&self.layout, self.members.len())
    }

    /// World position the next appended member will take.
    #[must_use]
    pub fn next_free_world_position(&self) -> Point {
        self.origin + self.next_free_position().to_vec2()
    }

    /// All candidate slots of this group.
    #[must_use]
    pub fn slot_positions(&self) -> Vec<Slot> {
        layout::slots_for(&self.layout)
    }

    /// Lay out every member that is not in flight, then refresh bounds.
    ///
    /// Members past the last slot stack on it. Returns the number of cards
    /// placed.
    pub fn rearrange(&mut self, cards: &mut CardMap) -> usize {
        let placed = self.apply_layout(cards, |_| true);
        self.refresh_bounds(placed);
        placed
    }

    /// Lay out only the members left behind by the current selection.
    ///
    /// Used while the selection is lifted out for a drag so the remaining
    /// members close ranks before the drop resolves.
    pub fn rearrange_from_selection(&mut self, cards: &mut CardMap) -> usize {
        let placed = self.apply_layout(cards, |id| !self.selected.contains(&id));
        self.refresh_bounds(placed);
        placed
    }

    /// Codes of the members in draw order, for meld classification.
    #[must_use]
    pub fn card_identifiers(&self, cards: &CardMap) -> Vec<String> {
        self.members
            .iter()
            .filter_map(|id| cards.get(id))
            .map(|card| card.code().to_string())
            .collect()
    }

    pub(crate) fn relocate(&mut self, origin: Point) {
        self.origin = origin;
        self.refresh_bounds(self.members.len());
    }

    pub(crate) fn set_layout(&mut self, layout: GroupLayout) {
        self.layout = layout;
        self.refresh_bounds(self.members.len());
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    fn apply_layout(&self, cards: &mut CardMap, include: impl Fn(CardId) -> bool) -> usize {
        let mut placed = 0;
        for &id in &self.members {
            if !include(id) {
                continue;
            }
            let Some(card) = cards.get_mut(&id) else {
                continue;
            };
            if card.is_dragging() {
                continue;
            }
            let index = layout::slot_index(&self.layout, placed);
            let slot = layout::slot_at(&self.layout, index);
            card.place(self.origin + slot.position.to_vec2(), slot.depth, slot.draw_order);
            placed += 1;
        }
        placed
    }

    fn refresh_bounds(&mut self, content: usize) {
        self.bounds = match self.layout.extent {
            Some(extent) => Rect::from_center_size(self.origin, extent),
            None => layout::fallback_bounds(&self.layout, self.origin, content),
        };
    }
}
