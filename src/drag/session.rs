//! The active drag gesture.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::core::ids::CardId;

/// Cards taking part in a drag, in drag order.
///
/// Most drags move a handful of cards, so these stay inline.
pub type DraggedCards = SmallVec<[CardId; 8]>;

/// Tracks one pointer-driven drag.
///
/// ```
/// use card_table::core::CardId;
/// use card_table::drag::DragSession;
/// use kurbo::{Point, Vec2};
///
/// let mut session = DragSession::new(Vec2::new(0.2, 0.0));
/// session.begin(
///     CardId::new(1),
///     Point::new(0.0, 0.0),
///     [(CardId::new(1), Point::new(1.0, 0.0)), (CardId::new(2), Point::new(2.0, 0.0))],
/// );
///
/// let moved = session.update(Point::new(5.0, 5.0));
/// assert_eq!(moved[0], (CardId::new(1), Point::new(6.0, 5.0)));
/// assert_eq!(moved[1], (CardId::new(2), Point::new(7.2, 5.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    /// Card the gesture started on.
    anchor: Option<CardId>,

    /// Dragged cards with their offset from the pointer at drag start.
    cards: SmallVec<[(CardId, Vec2); 8]>,

    /// Extra offset per index so co-dragged cards fan out.
    stack_step: Vec2,

    active: bool,
}

impl DragSession {
    /// Create an idle session.
    pub fn new(stack_step: Vec2) -> Self {
        Self {
            anchor: None,
            cards: SmallVec::new(),
            stack_step,
            active: false,
        }
    }

    /// Start tracking `cards` (with their current world positions).
    ///
    /// Any previous state is discarded.
    pub fn begin<I>(&mut self, anchor: CardId, pointer: Point, cards: I)
    where
        I: IntoIterator<Item = (CardId, Point)>,
    {
        self.cards.clear();
        self.cards
            .extend(cards.into_iter().map(|(id, position)| (id, position - pointer)));
        self.anchor = Some(anchor);
        self.active = true;
    }

    /// Target world positions for every dragged card.
    pub fn update(&self, pointer: Point) -> SmallVec<[(CardId, Point); 8]> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, &(id, offset))| (id, pointer + offset + self.stack_step * index as f64))
            .collect()
    }

    /// Finish the gesture, returning the cards that were dragged.
    pub fn end(&mut self) -> DraggedCards {
        let cards = self.cards.drain(..).map(|(id, _)| id).collect();
        self.anchor = None;
        self.active = false;
        cards
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Card the gesture started on.
    #[must_use]
    pub fn anchor(&self) -> Option<CardId> {
        self.anchor
    }

    /// Number of dragged cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no cards are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether `card` moves with this gesture.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.iter().any(|&(id, _)| id == card)
    }

    /// Dragged cards in drag order.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|&(id, _)| id)
    }
}
