//! Drag gestures and drop resolution.
//!
//! ## Drop targets
//!
//! On release the target is, in order:
//! 1. the first group (creation order) whose bounds contain the point
//! 2. the preview, for multi-card drags released over it (confirmed first)
//! 3. the anchor card's last hovered group, if it still exists
//! 4. nothing, which reverts the drag
//!
//! ## Transitions
//!
//! - **Same group**: the anchor snaps back, dragged cards are reset and the
//!   group is rearranged.
//! - **Other group**: co-dragged cards are reset and the source selection
//!   cleared, then each card moves over (co-dragged first, anchor last).
//!   Every move publishes a rearrange for the target, and either a deferred
//!   destroy (source emptied) or a rearrange for the source.
//! - **No target**: every dragged card returns to its pre-drag position.

use kurbo::Point;

use super::Table;
use crate::core::error::{TableError, TableResult};
use crate::core::ids::{CardId, GroupId};
use crate::drag::DraggedCards;
use crate::events::Message;
use crate::groups::Removal;

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released over the group the cards came from.
    SameGroup {
        /// The source group.
        group: GroupId,
    },
    /// Cards moved into another group.
    Transferred {
        /// Group the cards left.
        from: GroupId,
        /// Group the cards joined.
        to: GroupId,
        /// Number of cards moved.
        cards: usize,
    },
    /// No target; cards went back where they were.
    Reverted {
        /// The source group.
        group: GroupId,
    },
}

impl Table {
    /// Start dragging `card` from `pointer`.
    ///
    /// If the card is selected the whole selection of its group moves with
    /// it, in selection order. Fails if a drag is already in progress.
    pub fn drag_begin(&mut self, card: CardId, pointer: Point) -> TableResult<()> {
        if let Some(anchor) = self.drag.anchor() {
            tracing::warn!(%card, %anchor, "drag rejected: another drag is active");
            return Err(TableError::DragInProgress(anchor));
        }
        let source = self
            .cards
            .get(&card)
            .ok_or(TableError::UnknownCard(card))?
            .owner();
        self.flush_pending();

        let group = self
            .manager
            .get_mut(source)
            .ok_or(TableError::UnknownGroup(source))?;

        let anchor_selected = group.is_selected(card);
        let dragged: DraggedCards = if anchor_selected {
            group.selected_cards().iter().copied().collect()
        } else {
            std::iter::once(card).collect()
        };

        let mut positions = Vec::with_capacity(dragged.len());
        for &id in &dragged {
            if let Some(entry) = self.cards.get_mut(&id) {
                entry.begin_drag(pointer);
                positions.push((id, entry.position()));
            }
        }
        self.drag.begin(card, pointer, positions);

        if anchor_selected {
            group.rearrange_from_selection(&mut self.cards);
        }
        tracing::debug!(%card, %source, cards = dragged.len(), "drag started");
        self.publish(Message::rearrange(source));
        Ok(())
    }

    /// Move every dragged card with the pointer.
    ///
    /// Multi-card drags show the preview at the next placement while the
    /// pointer is over no group, and hide it otherwise.
    pub fn drag_update(&mut self, pointer: Point) {
        if !self.drag.is_active() {
            return;
        }
        for (id, position) in self.drag.update(pointer) {
            if let Some(card) = self.cards.get_mut(&id) {
                card.set_position(position);
            }
        }

        if self.drag.len() > 1 {
            if self.manager.group_at(pointer).is_none() {
                let at = self.manager.next_placement();
                self.manager.show_preview_at(at);
            } else {
                self.manager.hide_preview();
            }
        }
    }

    /// Release the drag at `pointer` and resolve the drop.
    ///
    /// Returns `None` if no drag was in progress.
    pub fn drag_end(&mut self, pointer: Point) -> TableResult<Option<DropOutcome>> {
        let Some(anchor) = self.drag.anchor() else {
            return Ok(None);
        };
        let dragged = self.drag.end();
        let source = self.drag_source(anchor)?;

        let target = self.resolve_target(anchor, pointer, dragged.len());

        let outcome = match target {
            Some(target) if target == source => self.drop_on_same_group(source, anchor, &dragged),
            Some(target) => self.drop_on_other_group(source, target, anchor, &dragged),
            None => self.revert(source, anchor, &dragged),
        };
        tracing::debug!(?outcome, %anchor, "drop resolved");
        Ok(Some(outcome))
    }

    /// Abandon the drag, sending every card back.
    pub fn cancel_drag(&mut self) -> TableResult<Option<DropOutcome>> {
        let Some(anchor) = self.drag.anchor() else {
            return Ok(None);
        };
        let dragged = self.drag.end();
        let source = self.drag_source(anchor)?;

        self.manager.hide_preview();
        let outcome = self.revert(source, anchor, &dragged);
        tracing::debug!(?outcome, %anchor, "drag cancelled");
        Ok(Some(outcome))
    }

    fn drag_source(&self, anchor: CardId) -> TableResult<GroupId> {
        let card = self.cards.get(&anchor).ok_or(TableError::UnknownCard(anchor))?;
        Ok(card.pre_drag().map_or(card.owner(), |pre| pre.owner))
    }

    fn resolve_target(&mut self, anchor: CardId, pointer: Point, count: usize) -> Option<GroupId> {
        if let Some(group) = self.manager.group_at(pointer) {
            self.manager.hide_preview();
            return Some(group);
        }

        if count > 1 && self.manager.preview_contains(pointer) {
            if let Some(group) = self.manager.confirm_preview() {
                self.subscribe_group(group);
                return Some(group);
            }
        }
        self.manager.hide_preview();

        self.cards
            .get(&anchor)
            .and_then(|card| card.last_hovered())
            .filter(|&group| self.manager.contains(group))
    }

    fn drop_on_same_group(&mut self, source: GroupId, anchor: CardId, dragged: &[CardId]) -> DropOutcome {
        if let Some(card) = self.cards.get_mut(&anchor) {
            if let Some(pre) = card.pre_drag() {
                card.set_position(pre.position);
            }
        }
        self.reset_dragged(source, anchor, dragged);
        self.publish(Message::rearrange(source));
        DropOutcome::SameGroup { group: source }
    }

    fn drop_on_other_group(
        &mut self,
        source: GroupId,
        target: GroupId,
        anchor: CardId,
        dragged: &[CardId],
    ) -> DropOutcome {
        self.reset_dragged(source, anchor, dragged);

        let order = dragged
            .iter()
            .copied()
            .filter(|&id| id != anchor)
            .chain(std::iter::once(anchor));

        let mut moved = 0;
        for card in order {
            if self.transfer(card, source, target) {
                moved += 1;
            }
        }
        DropOutcome::Transferred {
            from: source,
            to: target,
            cards: moved,
        }
    }

    fn revert(&mut self, source: GroupId, anchor: CardId, dragged: &[CardId]) -> DropOutcome {
        for id in dragged {
            if let Some(card) = self.cards.get_mut(id) {
                if let Some(pre) = card.pre_drag() {
                    card.set_position(pre.position);
                    card.set_owner(pre.owner);
                }
            }
        }
        self.reset_dragged(source, anchor, dragged);
        self.publish(Message::rearrange(source));
        DropOutcome::Reverted { group: source }
    }

    /// Reset the dragged cards and, for a selection drag, clear the
    /// source selection. The anchor is always reset last.
    fn reset_dragged(&mut self, source: GroupId, anchor: CardId, dragged: &[CardId]) {
        let selection_drag = self.cards.get(&anchor).is_some_and(|card| card.is_selected());

        if selection_drag {
            for id in dragged.iter().filter(|&&id| id != anchor) {
                if let Some(card) = self.cards.get_mut(id) {
                    card.reset();
                }
            }
            if let Some(group) = self.manager.get_mut(source) {
                group.clear_selection();
            }
        }
        if let Some(card) = self.cards.get_mut(&anchor) {
            card.reset();
        }
    }

    /// Move one card from `source` to the end of `target`.
    fn transfer(&mut self, card: CardId, source: GroupId, target: GroupId) -> bool {
        let Some(slot) = self.manager.get(target).map(|g| g.next_free_world_position()) else {
            return false;
        };
        let removal = self
            .manager
            .get_mut(source)
            .map_or(Removal::Absent, |g| g.remove_member(card));
        if removal == Removal::Absent {
            tracing::warn!(%card, %source, "transfer of a card its group does not hold");
            return false;
        }

        if let Some(group) = self.manager.get_mut(target) {
            group.add_member(card);
        }
        if let Some(entry) = self.cards.get_mut(&card) {
            entry.set_owner(target);
            entry.set_position(slot);
        }

        match removal {
            Removal::Emptied => self.publish(Message::destroy(source)),
            _ => self.publish(Message::rearrange(source)),
        }
        self.publish(Message::rearrange(target));
        true
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;
    use crate::cards::CardState;
    use crate::core::TableConfig;

    fn table_with(codes: &[&str]) -> (Table, GroupId, Vec<CardId>) {
        let mut table = Table::new(TableConfig::default());
        let group = table.spawn_group(codes.iter().copied());
        let members = table.group(group).unwrap().members().to_vec();
        (table, group, members)
    }

    fn far_away() -> Point {
        Point::new(100.0, 100.0)
    }

    #[test]
    fn test_drag_begin_single_card() {
        let (mut table, group, cards) = table_with(&["S2", "S3", "S4"]);
        let at = table.card(cards[1]).unwrap().position();

        table.drag_begin(cards[1], at).unwrap();

        assert!(table.is_dragging());
        assert_eq!(table.card(cards[1]).unwrap().state(), CardState::Dragging);
        // Remaining members closed the gap
        let origin = table.group(group).unwrap().origin();
        let local = table.card(cards[2]).unwrap().local_position(origin);
        assert!((local.x - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_drag_begin_selected_single_card() {
        let (mut table, group, cards) = table_with(&["S2", "S3", "S4"]);
        table.click(cards[0]).unwrap();
        let at = table.card(cards[0]).unwrap().position();

        table.drag_begin(cards[0], at).unwrap();

        assert_eq!(table.drag().len(), 1);
        let origin = table.group(group).unwrap().origin();
        let second = table.card(cards[1]).unwrap().local_position(origin);
        let third = table.card(cards[2]).unwrap().local_position(origin);
        assert!(second.x.abs() < 1e-9);
        assert!((third.x - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_drag_begin_twice_fails() {
        let (mut table, _, cards) = table_with(&["S2", "S3"]);
        table.drag_begin(cards[0], Point::ORIGIN).unwrap();

        let err = table.drag_begin(cards[1], Point::ORIGIN).unwrap_err();
        assert_eq!(err, TableError::DragInProgress(cards[0]));
    }

    #[test]
    fn test_drag_update_follows_pointer() {
        let (mut table, _, cards) = table_with(&["S2"]);
        let start = table.card(cards[0]).unwrap().position();
        let pointer = start + Vec2::new(0.1, 0.1);
        table.drag_begin(cards[0], pointer).unwrap();

        table.drag_update(Point::new(2.1, 3.1));

        let pos = table.card(cards[0]).unwrap().position();
        assert!((pos.x - 2.0).abs() < 1e-9);
        assert!((pos.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_release_over_source_snaps_back() {
        let (mut table, group, cards) = table_with(&["S2", "S3"]);
        let before = table.card(cards[0]).unwrap().position();
        let inside = table.group(group).unwrap().origin() + Vec2::new(0.1, 0.0);

        table.drag_begin(cards[0], before).unwrap();
        table.drag_update(inside);
        let outcome = table.drag_end(inside).unwrap();

        assert_eq!(outcome, Some(DropOutcome::SameGroup { group }));
        assert_eq!(table.card(cards[0]).unwrap().position(), before);
        assert_eq!(table.card(cards[0]).unwrap().state(), CardState::Idle);
        table.verify().unwrap();
    }

    #[test]
    fn test_release_nowhere_reverts() {
        let (mut table, group, cards) = table_with(&["S2", "S3"]);
        let before: Vec<_> = cards.iter().map(|&c| table.card(c).unwrap().position()).collect();

        table.drag_begin(cards[0], before[0]).unwrap();
        table.drag_update(far_away());
        let outcome = table.drag_end(far_away()).unwrap();

        assert_eq!(outcome, Some(DropOutcome::Reverted { group }));
        let after: Vec<_> = cards.iter().map(|&c| table.card(c).unwrap().position()).collect();
        assert_eq!(before, after);
        table.verify().unwrap();
    }

    #[test]
    fn test_drag_end_without_drag() {
        let (mut table, _, _) = table_with(&["S2"]);
        assert_eq!(table.drag_end(Point::ORIGIN), Ok(None));
        assert_eq!(table.cancel_drag(), Ok(None));
    }

    #[test]
    fn test_cancel_drag_reverts() {
        let (mut table, group, cards) = table_with(&["S2", "S3"]);
        let before = table.card(cards[1]).unwrap().position();

        table.drag_begin(cards[1], before).unwrap();
        table.drag_update(far_away());
        let outcome = table.cancel_drag().unwrap();

        assert_eq!(outcome, Some(DropOutcome::Reverted { group }));
        assert_eq!(table.card(cards[1]).unwrap().position(), before);
        assert!(!table.is_dragging());
    }
}
