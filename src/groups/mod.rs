//! Groups: spatial containers of cards and the manager that owns them.
//!
//! ## Key Types
//!
//! - [`Group`]: Ordered members, a selection subset, layout and bounds
//! - [`GroupManager`]: Group set, placement, hit-testing, preview
//! - [`PreviewGroup`]: Transient drop target with a blinking outline
//! - [`BlinkTimer`]: Cancellable periodic timer driven by elapsed time

mod group;
mod manager;
mod preview;

pub use group::{Group, Removal};
pub use manager::GroupManager;
pub use preview::{BlinkTimer, PreviewGroup};
