//! Pointer input routing.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::{DropOutcome, Table};
use crate::core::error::TableResult;
use crate::core::ids::{CardId, GroupId};

/// A resolved pointer event in table coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Press and release without movement.
    Click { point: Point },
    /// Pointer started moving with the button held.
    DragBegin { point: Point },
    /// Pointer moved during a drag.
    DragUpdate { point: Point },
    /// Button released after a drag.
    DragEnd { point: Point },
    /// A card's collider entered a group's area.
    OverlapEntered { card: CardId, group: GroupId },
}

impl Table {
    /// Route a pointer event to the matching operation.
    ///
    /// Clicks and drag starts act on the topmost card under the point and
    /// do nothing over empty space. Only a drag end yields an outcome.
    pub fn handle(&mut self, event: PointerEvent) -> TableResult<Option<DropOutcome>> {
        match event {
            PointerEvent::Click { point } => {
                if let Some(card) = self.card_at(point) {
                    self.click(card)?;
                }
                Ok(None)
            }
            PointerEvent::DragBegin { point } => {
                if let Some(card) = self.card_at(point) {
                    self.drag_begin(card, point)?;
                }
                Ok(None)
            }
            PointerEvent::DragUpdate { point } => {
                self.drag_update(point);
                Ok(None)
            }
            PointerEvent::DragEnd { point } => self.drag_end(point),
            PointerEvent::OverlapEntered { card, group } => {
                self.overlap_entered(card, group)?;
                Ok(None)
            }
        }
    }
}
