//! The table: cards, groups, the bus and the active drag, wired together.
//!
//! `Table` is the single owner of every piece of mutable state. Cards and
//! groups refer to each other by ID; the table keeps both sides of that
//! relation in step.
//!
//! ## Message flow
//!
//! Membership changes are announced on the [`EventBus`]. The table itself
//! subscribes once per live group (rearrange requests for that group) and
//! once for group destruction. Those internal handlers only queue the
//! message; the table drains the queue right after each publish, so a
//! rearrange is applied before the next step of the operation that
//! published it.
//!
//! Deferred destroy requests wait in a pending queue until the next `tick`,
//! `click` or `drag_begin`. A group that gained members in the meantime
//! survives.
//!
//! ```
//! use card_table::{Table, TableConfig};
//!
//! let mut table = Table::new(TableConfig::default());
//! let group = table.spawn_group(["SA", "H10", "JK"]);
//!
//! assert_eq!(table.group_card_identifiers(group).unwrap(), vec!["SA", "H10", "JK"]);
//! table.verify().unwrap();
//! ```

mod drop;
mod input;

pub use drop::DropOutcome;
pub use input::PointerEvent;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Point;
use rustc_hash::FxHashMap;

use crate::cards::{Card, CardDecoder, CardMap, Deck, StandardDecoder};
use crate::core::config::TableConfig;
use crate::core::error::{TableError, TableResult};
use crate::core::ids::{CardId, GroupId};
use crate::drag::DragSession;
use crate::events::{EventBus, Message, MessageKind, SubscriptionId};
use crate::groups::{Group, GroupManager};

/// Messages queued by the table's own bus handlers.
type Inbox = Rc<RefCell<VecDeque<Message>>>;

/// Card table state machine.
pub struct Table {
    config: TableConfig,
    decoder: Box<dyn CardDecoder>,

    cards: CardMap,
    next_card_id: u32,

    manager: GroupManager,
    bus: EventBus,
    inbox: Inbox,

    /// Rearrange subscription of each live group.
    group_subscriptions: FxHashMap<GroupId, SubscriptionId>,

    /// Deferred destroy requests, oldest first.
    pending_destroy: Vec<GroupId>,

    drag: DragSession,
}

impl Table {
    /// Create an empty table using the standard card decoder.
    pub fn new(config: TableConfig) -> Self {
        let decoder = StandardDecoder::new(config.joker_code.clone());
        Self::with_decoder(config, decoder)
    }

    /// Create an empty table with a custom card decoder.
    pub fn with_decoder(config: TableConfig, decoder: impl CardDecoder + 'static) -> Self {
        let mut table = Self {
            manager: GroupManager::new(config.manager.clone()),
            drag: DragSession::new(config.stack_step),
            config,
            decoder: Box::new(decoder),
            cards: CardMap::default(),
            next_card_id: 0,
            bus: EventBus::new(),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            group_subscriptions: FxHashMap::default(),
            pending_destroy: Vec::new(),
        };
        table.subscribe_manager();
        table
    }

    // === Accessors ===

    /// Table configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Every card on the table.
    #[must_use]
    pub fn cards(&self) -> &CardMap {
        &self.cards
    }

    /// Get a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a group.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.manager.get(id)
    }

    /// The group manager (groups, placement, preview).
    #[must_use]
    pub fn groups(&self) -> &GroupManager {
        &self.manager
    }

    /// The current drag session.
    #[must_use]
    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Groups waiting for a deferred destroy.
    #[must_use]
    pub fn pending_destroys(&self) -> &[GroupId] {
        &self.pending_destroy
    }

    /// The notification bus.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // === Spawning ===

    /// Create an empty group at the next placement.
    pub fn create_group(&mut self) -> GroupId {
        let id = self.manager.create_empty_group();
        self.subscribe_group(id);
        id
    }

    /// Add a card decoded from `code` to `group`.
    pub fn spawn_card(&mut self, group: GroupId, code: impl Into<String>) -> TableResult<CardId> {
        if !self.manager.contains(group) {
            return Err(TableError::UnknownGroup(group));
        }
        let id = self.insert_card(group, code.into());
        self.publish(Message::rearrange(group));
        Ok(id)
    }

    /// Create a group holding one card per code, laid out in order.
    pub fn spawn_group<I, S>(&mut self, codes: I) -> GroupId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group = self.create_group();
        let mut count = 0usize;
        for code in codes {
            self.insert_card(group, code.into());
            count += 1;
        }
        tracing::debug!(%group, count, "group spawned");
        self.publish(Message::rearrange(group));
        group
    }

    /// Draw `count` cards from `deck` into a new group.
    ///
    /// Returns `None` without creating a group when nothing could be drawn.
    pub fn deal(&mut self, deck: &mut Deck, count: usize) -> Option<GroupId> {
        let codes = deck.draw_many(count);
        if codes.len() < count {
            tracing::warn!(requested = count, dealt = codes.len(), "deck ran out while dealing");
        }
        if codes.is_empty() {
            return None;
        }
        Some(self.spawn_group(codes))
    }

    // === Selection ===

    /// Toggle a card's selection.
    ///
    /// Returns whether the card is selected afterwards. Ignored while a drag
    /// is in progress. A card whose owner is missing stays unselected.
    pub fn click(&mut self, card: CardId) -> TableResult<bool> {
        if !self.cards.contains_key(&card) {
            return Err(TableError::UnknownCard(card));
        }
        if self.drag.is_active() {
            return Ok(self.cards.get(&card).is_some_and(Card::is_selected));
        }
        self.flush_pending();

        let lift = self.config.selection_lift;
        let Some(entry) = self.cards.get_mut(&card) else {
            return Err(TableError::UnknownCard(card));
        };
        let Some(group) = self.manager.get_mut(entry.owner()) else {
            entry.deselect();
            return Ok(false);
        };

        if entry.is_selected() {
            entry.deselect();
            group.remove_from_selection(card);
        } else {
            entry.select(lift);
            group.add_to_selection(card);
        }
        Ok(entry.is_selected())
    }

    /// Record that a card's collider entered a group.
    ///
    /// The last hovered group is the drop fallback when the release point
    /// is outside every group. Only overlaps during a drag count; cards
    /// outside the active drag are ignored.
    pub fn overlap_entered(&mut self, card: CardId, group: GroupId) -> TableResult<()> {
        if !self.manager.contains(group) {
            return Err(TableError::UnknownGroup(group));
        }
        let entry = self
            .cards
            .get_mut(&card)
            .ok_or(TableError::UnknownCard(card))?;
        if !self.drag.contains(card) {
            tracing::trace!(%card, %group, "overlap ignored outside drag");
            return Ok(());
        }
        entry.set_last_hovered(Some(group));
        Ok(())
    }

    // === Queries ===

    /// Topmost card whose visual rectangle contains `point`.
    #[must_use]
    pub fn card_at(&self, point: Point) -> Option<CardId> {
        let size = self.config.card_size;
        self.cards
            .values()
            .filter(|card| card.visual_rect(size).contains(point))
            .max_by_key(|card| (card.draw_order(), card.id()))
            .map(Card::id)
    }

    /// Member codes of a group in draw order.
    pub fn group_card_identifiers(&self, group: GroupId) -> TableResult<Vec<String>> {
        self.manager
            .get(group)
            .map(|g| g.card_identifiers(&self.cards))
            .ok_or(TableError::UnknownGroup(group))
    }

    // === Bus ===

    /// Subscribe an external handler to one message kind.
    pub fn subscribe<F>(&mut self, kind: MessageKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&Message) + 'static,
    {
        self.bus.subscribe(kind, handler)
    }

    /// Remove an external handler.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Publish on the bus, then apply whatever the table's handlers queued.
    ///
    /// External tooling can request rearranges or destroys this way. A
    /// destroy for a group that still has members is dropped.
    pub fn publish(&mut self, message: Message) {
        self.bus.publish(&message);
        self.pump();
    }

    // === Time ===

    /// Advance time: flush deferred destroys and blink the preview.
    pub fn tick(&mut self, dt: Duration) {
        self.flush_pending();
        self.manager.tick(dt);
    }

    /// Remove every card, group and subscription.
    pub fn reset(&mut self) {
        self.drag.end();
        self.cards.clear();
        self.manager.clear();
        self.bus.clear();
        self.inbox.borrow_mut().clear();
        self.group_subscriptions.clear();
        self.pending_destroy.clear();
        self.subscribe_manager();
        tracing::debug!("table reset");
    }

    /// Check membership, ownership and selection bookkeeping.
    pub fn verify(&self) -> TableResult<()> {
        let mut seen: FxHashMap<CardId, GroupId> = FxHashMap::default();

        for group in self.manager.iter() {
            if !self.group_subscriptions.contains_key(&group.id()) {
                return Err(inconsistent(format!("{} has no rearrange subscription", group.id())));
            }
            for &member in group.members() {
                if let Some(other) = seen.insert(member, group.id()) {
                    return Err(inconsistent(format!(
                        "{member} is a member of both {other} and {}",
                        group.id()
                    )));
                }
                let card = self.cards.get(&member).ok_or_else(|| {
                    inconsistent(format!("{} lists missing {member}", group.id()))
                })?;
                if card.owner() != group.id() {
                    return Err(inconsistent(format!(
                        "{member} is in {} but owned by {}",
                        group.id(),
                        card.owner()
                    )));
                }
            }
            for &selected in group.selected_cards() {
                if !group.contains(selected) {
                    return Err(inconsistent(format!(
                        "{selected} is selected in {} but not a member",
                        group.id()
                    )));
                }
            }
        }

        for card in self.cards.values() {
            if !seen.contains_key(&card.id()) {
                return Err(inconsistent(format!("{} belongs to no group", card.id())));
            }
            if self.drag.is_active() {
                continue;
            }
            let registered = self
                .manager
                .get(card.owner())
                .is_some_and(|g| g.is_selected(card.id()));
            if card.is_selected() != registered {
                return Err(inconsistent(format!(
                    "{} selection flag disagrees with its group",
                    card.id()
                )));
            }
        }
        Ok(())
    }

    // === Internals ===

    fn insert_card(&mut self, group: GroupId, code: String) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;

        let (suit, rank) = self.decoder.decode(&code);
        self.cards.insert(id, Card::new(id, code, suit, rank, group));
        if let Some(g) = self.manager.get_mut(group) {
            g.add_member(id);
        }
        id
    }

    fn subscribe_manager(&mut self) {
        let inbox = Rc::clone(&self.inbox);
        self.bus.subscribe(MessageKind::GroupDestroy, move |message| {
            inbox.borrow_mut().push_back(*message);
        });
    }

    fn subscribe_group(&mut self, group: GroupId) {
        let inbox = Rc::clone(&self.inbox);
        let id = self.bus.subscribe(MessageKind::Rearrange, move |message| {
            if message.group() == group {
                inbox.borrow_mut().push_back(*message);
            }
        });
        self.group_subscriptions.insert(group, id);
    }

    fn pump(&mut self) {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(message) = next else {
                break;
            };
            match message {
                Message::RearrangeRequested { group } => {
                    if let Some(g) = self.manager.get_mut(group) {
                        g.rearrange(&mut self.cards);
                    }
                }
                Message::GroupDestroyRequested { group, immediate: true } => {
                    self.destroy_group_now(group);
                }
                Message::GroupDestroyRequested { group, immediate: false } => {
                    if !self.pending_destroy.contains(&group) {
                        self.pending_destroy.push(group);
                    }
                }
            }
        }
    }

    fn flush_pending(&mut self) {
        for group in std::mem::take(&mut self.pending_destroy) {
            self.destroy_group_now(group);
        }
    }

    fn destroy_group_now(&mut self, id: GroupId) {
        self.pending_destroy.retain(|&g| g != id);
        match self.manager.get(id) {
            None => return,
            Some(group) if !group.is_empty() => {
                tracing::warn!(%id, members = group.len(), "destroy request for non-empty group dropped");
                return;
            }
            Some(_) => {}
        }
        if let Some(subscription) = self.group_subscriptions.remove(&id) {
            self.bus.unsubscribe(subscription);
        }
        self.manager.destroy_group(id);
    }
}

fn inconsistent(detail: String) -> TableError {
    TableError::Inconsistent(detail)
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("cards", &self.cards.len())
            .field("groups", &self.manager.ids())
            .field("pending_destroy", &self.pending_destroy)
            .field("drag", &self.drag)
            .field("bus", &self.bus)
            .finish()
    }
}
