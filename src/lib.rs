//! # card-table
//!
//! Card groups, selection and drag-and-drop for card table games.
//!
//! ## Design Principles
//!
//! 1. **IDs, not pointers**: Cards and groups reference each other by
//!    `CardId` / `GroupId`. The `Table` owns both sides and keeps them in
//!    step; `Table::verify` checks it.
//!
//! 2. **Notifications over callbacks**: Membership changes are announced on
//!    an `EventBus` as plain `Message` values. Groups never know who listens.
//!
//! 3. **Every edge has a resolution**: Bad card codes decode to an invalid
//!    rank, full groups stack on their last slot, drops outside every group
//!    revert. Errors are reserved for caller contract violations.
//!
//! ## Modules
//!
//! - `core`: IDs, configuration, errors, deal RNG
//! - `cards`: Card codes, decks, the card entity
//! - `events`: Messages and the notification bus
//! - `layout`: Slot positions and fallback bounds
//! - `groups`: Groups, the group manager, the preview
//! - `drag`: Drag session tracking
//! - `table`: The coordinator: input, drag/drop, lifecycle
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod core;
pub mod cards;
pub mod events;
pub mod layout;
pub mod groups;
pub mod drag;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    CardId, GroupId,
    GroupLayout, Pivot, ManagerConfig, TableConfig,
    TableError, TableResult,
    DealCheckpoint, DealRng,
};

pub use crate::cards::{Card, CardState, CardDecoder, StandardDecoder, Suit, Rank, Deck};

pub use crate::events::{EventBus, Message, MessageKind, SubscriptionId};

pub use crate::groups::{Group, GroupManager, PreviewGroup, BlinkTimer, Removal};

pub use crate::drag::DragSession;

pub use crate::table::{Table, PointerEvent, DropOutcome};
