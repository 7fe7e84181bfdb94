//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use card_table::{CardId, GroupId, GroupLayout, Message, MessageKind, Table, TableConfig};
use kurbo::{Point, Vec2};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness (`RUST_LOG=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Table with ten-slot groups spaced 0.6 apart.
pub fn ten_slot_table() -> Table {
    init_tracing();
    let layout = GroupLayout::new(Vec2::new(0.6, 0.0), 10);
    Table::new(TableConfig::default().with_layout(layout))
}

/// Members of a group, in draw order.
pub fn members(table: &Table, group: GroupId) -> Vec<CardId> {
    table.group(group).unwrap().members().to_vec()
}

/// A point just inside a group's left edge.
pub fn inside(table: &Table, group: GroupId) -> Point {
    table.group(group).unwrap().origin() + Vec2::new(0.1, 0.0)
}

/// A point outside every group.
pub fn nowhere() -> Point {
    Point::new(100.0, 100.0)
}

/// Card position relative to its group's origin.
pub fn local(table: &Table, card: CardId) -> Point {
    let card = table.card(card).unwrap();
    card.local_position(table.group(card.owner()).unwrap().origin())
}

pub fn assert_near(actual: Point, expected: Point) {
    assert!(
        (actual - expected).hypot() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

/// Record every destroy request published on the table's bus.
pub fn record_destroys(table: &mut Table) -> Rc<RefCell<Vec<Message>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    table.subscribe(MessageKind::GroupDestroy, move |m| sink.borrow_mut().push(*m));
    log
}

/// Drag `card` from where it sits and release it at `to`.
pub fn drag_to(table: &mut Table, card: CardId, to: Point) -> Option<card_table::DropOutcome> {
    let from = table.card(card).unwrap().position();
    table.drag_begin(card, from).unwrap();
    table.drag_update(to);
    table.drag_end(to).unwrap()
}
