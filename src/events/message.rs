//! Notification messages.
//!
//! Producers publish intent ("this group needs rearranging", "this group
//! should be destroyed") without holding references to whoever reacts.
//! Message kinds are a closed set, so dispatch is a plain `match`.

use serde::{Deserialize, Serialize};

use crate::core::GroupId;

/// Discriminant used to key subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// `Message::RearrangeRequested`
    Rearrange,
    /// `Message::GroupDestroyRequested`
    GroupDestroy,
}

/// A published notification. Immutable once published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    /// The group's members should be laid out again.
    RearrangeRequested {
        /// Group to rearrange.
        group: GroupId,
    },
    /// The group became empty and should be removed.
    GroupDestroyRequested {
        /// Group to destroy.
        group: GroupId,
        /// Destroy now rather than on the next tick.
        immediate: bool,
    },
}

impl Message {
    /// Rearrange request for `group`.
    #[must_use]
    pub const fn rearrange(group: GroupId) -> Self {
        Message::RearrangeRequested { group }
    }

    /// Deferred destroy request for `group`.
    #[must_use]
    pub const fn destroy(group: GroupId) -> Self {
        Message::GroupDestroyRequested {
            group,
            immediate: false,
        }
    }

    /// Destroy request for `group` that skips the deferral.
    #[must_use]
    pub const fn destroy_now(group: GroupId) -> Self {
        Message::GroupDestroyRequested {
            group,
            immediate: true,
        }
    }

    /// The kind of this message.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Message::RearrangeRequested { .. } => MessageKind::Rearrange,
            Message::GroupDestroyRequested { .. } => MessageKind::GroupDestroy,
        }
    }

    /// The group the message is about.
    #[must_use]
    pub const fn group(&self) -> GroupId {
        match self {
            Message::RearrangeRequested { group } | Message::GroupDestroyRequested { group, .. } => {
                *group
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let g = GroupId::new(2);

        assert_eq!(Message::rearrange(g).kind(), MessageKind::Rearrange);
        assert_eq!(
            Message::destroy(g),
            Message::GroupDestroyRequested {
                group: g,
                immediate: false
            }
        );
        assert_eq!(Message::destroy_now(g).kind(), MessageKind::GroupDestroy);
        assert_eq!(Message::destroy_now(g).group(), g);
    }

    #[test]
    fn test_message_serde() {
        let message = Message::destroy(GroupId::new(5));
        let json = serde_json::to_string(&message).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
