//! Change notifier implementation.
//!
//! Provides the `ChangeNotifier` struct that a selection model owns and
//! exposes to observers.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use super::model_event::{ModelEvent, Property};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific properties
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events for any of these properties.
    Properties(Vec<Property>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &ModelEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Properties(props) => props.contains(&event.property()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler = Arc<dyn Fn(&ModelEvent) + Send + Sync>;

/// Per-model registry of property-change subscribers.
///
/// Handlers run synchronously on the publishing thread, in subscription
/// order, so they should return quickly. The registry lock is not held
/// while handlers run, so a handler may subscribe or unsubscribe through
/// a shared handle without deadlocking. The notifier is `Send + Sync`:
/// the search worker publishes `Progress` events through a shared handle
/// while the model publishes everything else from the caller's thread.
pub struct ChangeNotifier {
    handlers: RwLock<Vec<(SubscriptionId, EventFilter, EventHandler)>>,
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Publish an event to all matching subscribers.
    ///
    /// Returns the number of handlers that received the event. The set of
    /// recipients is the set of matching subscriptions at publish time;
    /// handlers added or removed by a running handler take effect for the
    /// next publish.
    pub fn publish(&self, event: &ModelEvent) -> usize {
        let matching: Vec<EventHandler> = self
            .handlers
            .read()
            .iter()
            .filter(|(_, filter, _)| filter.matches(event))
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();
        for handler in &matching {
            handler(event);
        }
        matching.len()
    }

    /// Subscribe to events with a synchronous handler.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.push((id, filter, Arc::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sid, _, _)| *sid != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
