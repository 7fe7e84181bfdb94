//! Drag gesture tracking.
//!
//! A [`DragSession`] knows which cards move with the pointer and how far
//! each sat from the pointer when the gesture began. It knows nothing about
//! groups; drop resolution lives on the table.

mod session;

pub use session::{DragSession, DraggedCards};
