//! Fan-out of handler notifications to event items

use super::item::EventListenerGuard;
use super::types::{AddHandlerEvent, RemoveHandlerEvent};

/// Ordered collection of event items.
///
/// Notifications are forwarded to every item in registration order; each item
/// decides for itself whether the handler type concerns it.
#[derive(Default)]
pub struct EventItemManager {
    items: Vec<Box<dyn EventListenerGuard>>,
}

impl EventItemManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Items are notified in the order they were added.
    pub fn add_item(&mut self, item: impl EventListenerGuard + 'static) {
        self.items.push(Box::new(item));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl EventListenerGuard for EventItemManager {
    fn on_handler_added(&mut self, event: &AddHandlerEvent) {
        tracing::trace!(handler = %event.handler_type(), items = self.items.len(), "Handler added");
        for item in &mut self.items {
            item.on_handler_added(event);
        }
    }

    fn on_handler_removed(&mut self, event: &RemoveHandlerEvent) {
        tracing::trace!(handler = %event.handler_type(), items = self.items.len(), "Handler removed");
        for item in &mut self.items {
            item.on_handler_removed(event);
        }
    }
}

impl std::fmt::Debug for EventItemManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventItemManager")
            .field("items", &self.items.len())
            .finish()
    }
}
