//! Table error type.
//!
//! Almost every boundary condition on the table has a defined non-failing
//! resolution (clamping, reverting, ignoring redundant calls). Errors are
//! reserved for contract violations by the caller.

use super::ids::{CardId, GroupId};

/// Errors returned by table operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A drag was started while another drag session is still active.
    #[error("drag already in progress (started on {0})")]
    DragInProgress(CardId),

    /// The card does not exist on this table.
    #[error("unknown card: {0}")]
    UnknownCard(CardId),

    /// The group does not exist on this table.
    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    /// Membership or selection bookkeeping disagrees with itself.
    #[error("inconsistent table state: {0}")]
    Inconsistent(String),
}

/// Result alias for table operations.
pub type TableResult<T> = Result<T, TableError>;
