//! Notification bus.
//!
//! Groups never hold references to the cards or managers that react to
//! their state. Instead, whoever mutates membership publishes a `Message`
//! and whoever is currently subscribed reacts.
//!
//! ## Key Components
//!
//! - [`Message`]: `RearrangeRequested` / `GroupDestroyRequested`
//! - [`MessageKind`]: Subscription key
//! - [`EventBus`]: Subscriber registry with synchronous delivery

mod bus;
mod message;

pub use bus::{EventBus, SubscriptionId};
pub use message::{Message, MessageKind};
