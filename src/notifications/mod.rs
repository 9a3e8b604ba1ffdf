// ABOUTME: Change notifier broadcasting profile update events to connected listeners
// ABOUTME: Fire-and-forget fan-out over a tokio broadcast channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Change Notifications
//!
//! Events are published after a successful commit only. Delivery is
//! best-effort: there is no acknowledgment, no replay for listeners that were
//! not connected, and a send with no listeners is silently dropped.

use crate::constants::{events, limits::NOTIFICATION_CHANNEL_CAPACITY};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Event pushed to listeners
///
/// Serialized as `{"event":"profileUpdated","data":{"userId":7}}`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ChangeEvent {
    /// A staff member's profile was committed
    #[serde(rename = "profileUpdated")]
    ProfileUpdated {
        /// Account id of the staff member who updated their profile
        #[serde(rename = "userId")]
        user_id: i64,
    },
}

impl ChangeEvent {
    /// Wire name of the event
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProfileUpdated { .. } => events::PROFILE_UPDATED,
        }
    }
}

/// Publishes change events to every subscriber
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_CHANNEL_CAPACITY)
    }
}

impl ChangeNotifier {
    /// Create a notifier buffering up to `capacity` events per slow listener
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a listener; it receives events published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Number of live listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Announce a committed profile update
    pub fn profile_updated(&self, user_id: i64) {
        self.publish(ChangeEvent::ProfileUpdated { user_id });
    }

    fn publish(&self, event: ChangeEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(listeners) => debug!(event = name, listeners, "Published change event"),
            Err(broadcast::error::SendError(event)) => {
                trace!(?event, "No listeners for change event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = ChangeEvent::ProfileUpdated { user_id: 7 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
        assert_eq!(
            json,
            serde_json::json!({"event": "profileUpdated", "data": {"userId": 7}})
        );
    }

    #[tokio::test]
    async fn test_every_listener_receives_the_event() {
        let notifier = ChangeNotifier::default();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        notifier.profile_updated(9);

        assert_eq!(first.recv().await.unwrap(), ChangeEvent::ProfileUpdated { user_id: 9 });
        assert_eq!(second.recv().await.unwrap(), ChangeEvent::ProfileUpdated { user_id: 9 });
    }

    #[test]
    fn test_publish_without_listeners_is_harmless() {
        let notifier = ChangeNotifier::default();
        assert_eq!(notifier.listener_count(), 0);
        notifier.profile_updated(1);
    }
}
