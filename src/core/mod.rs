//! Core types: IDs, configuration, errors, RNG.
//!
//! Nothing here knows about groups or drag state; the rest of the crate
//! builds on these.

pub mod ids;
pub mod config;
pub mod error;
pub mod rng;

pub use ids::{CardId, GroupId};
pub use config::{GroupLayout, Pivot, ManagerConfig, TableConfig};
pub use error::{TableError, TableResult};
pub use rng::{DealCheckpoint, DealRng};
