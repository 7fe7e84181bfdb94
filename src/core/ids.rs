//! Identifiers for table objects.
//!
//! Cards and groups are referenced by small copyable IDs rather than by
//! pointer. A card's owning group is a `GroupId` back-reference; the group
//! holds the card's `CardId` in its member sequence. Neither owns the other.
//!
//! ```
//! use card_table::core::{CardId, GroupId};
//!
//! let card = CardId::new(7);
//! let group = GroupId::new(1);
//!
//! assert_eq!(card.raw(), 7);
//! assert_eq!(format!("{}", group), "Group(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Stable identifier of a card on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Identifier of a group (a spatial container of cards).
///
/// IDs are never reused within a table, so a stale `GroupId` held by a
/// card's hover fallback simply fails to resolve after the group is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Create a new group ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group({})", self.0)
    }
}
