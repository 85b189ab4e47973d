//! Handler registration and dispatch
//!
//! [`EventManager`] owns the handlers added by host code. Its handler table is
//! the count oracle for the event items it notifies, and [`EventManager::proxy`]
//! builds the single native callback an item attaches to its emitter.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::item::{Emitter, EventItem, EventListenerGuard, HandlerCounter};
use super::manager::EventItemManager;
use super::types::{AddHandlerEvent, HandlerType, RemoveHandlerEvent};

/// Callback invoked with the event payload
pub type EventHandler<P> = Rc<dyn Fn(&P)>;

/// Returned by [`EventManager::add_handler`]; removes that one handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerRegistration {
    id: u64,
    handler_type: HandlerType,
}

impl HandlerRegistration {
    pub fn handler_type(&self) -> HandlerType {
        self.handler_type
    }
}

struct HandlerEntry<P> {
    id: u64,
    handler_type: HandlerType,
    handler: EventHandler<P>,
}

struct HandlerTable<P> {
    entries: RefCell<Vec<HandlerEntry<P>>>,
}

impl<P> HandlerTable<P> {
    /// Call every handler of a type on a snapshot, so handlers may add or
    /// remove handlers while running
    fn dispatch(&self, handler_type: HandlerType, payload: &P) -> usize {
        let handlers: Vec<EventHandler<P>> = self
            .entries
            .borrow()
            .iter()
            .filter(|entry| entry.handler_type == handler_type)
            .map(|entry| Rc::clone(&entry.handler))
            .collect();

        for handler in &handlers {
            handler(payload);
        }
        handlers.len()
    }
}

impl<P> HandlerCounter for HandlerTable<P> {
    fn handler_count(&self, handler_type: HandlerType) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.handler_type == handler_type)
            .count()
    }
}

/// Registered handlers plus the event items that track them
pub struct EventManager<P> {
    table: Rc<HandlerTable<P>>,
    items: EventItemManager,
    next_id: u64,
}

impl<P: 'static> EventManager<P> {
    pub fn new() -> Self {
        Self {
            table: Rc::new(HandlerTable {
                entries: RefCell::new(Vec::new()),
            }),
            items: EventItemManager::new(),
            next_id: 0,
        }
    }

    /// Count oracle backed by this manager's handlers
    pub fn counter(&self) -> Rc<dyn HandlerCounter> {
        self.table.clone()
    }

    /// Native callback that dispatches to this manager's handlers of one type.
    ///
    /// The callback holds the table weakly; once the manager is dropped it
    /// does nothing.
    pub fn proxy(&self, handler_type: HandlerType) -> EventHandler<P> {
        let table: Weak<HandlerTable<P>> = Rc::downgrade(&self.table);
        Rc::new(move |payload: &P| match table.upgrade() {
            Some(table) => {
                table.dispatch(handler_type, payload);
            }
            None => tracing::debug!(handler = %handler_type, "Event manager dropped, ignoring event"),
        })
    }

    /// Register an event item to be notified when handlers come and go
    pub fn add_item(&mut self, item: impl EventListenerGuard + 'static) {
        self.items.add_item(item);
    }

    /// Track `handler_type` on `emitter` with a proxy listener.
    ///
    /// If handlers of that type are already registered the listener is
    /// attached right away.
    pub fn track<M>(&mut self, handler_type: HandlerType, emitter: Rc<M>)
    where
        M: Emitter<Listener = EventHandler<P>> + 'static,
    {
        let mut item = EventItem::new(
            handler_type,
            emitter,
            self.counter(),
            self.proxy(handler_type),
        );
        item.on_handler_added(&AddHandlerEvent::new(handler_type));
        self.add_item(item);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Add a handler and notify the event items
    pub fn add_handler(
        &mut self,
        handler_type: HandlerType,
        handler: impl Fn(&P) + 'static,
    ) -> HandlerRegistration {
        let id = self.next_id;
        self.next_id += 1;
        self.table.entries.borrow_mut().push(HandlerEntry {
            id,
            handler_type,
            handler: Rc::new(handler),
        });

        tracing::debug!(handler = %handler_type, id, "Added handler");
        self.items.on_handler_added(&AddHandlerEvent::new(handler_type));

        HandlerRegistration { id, handler_type }
    }

    /// Remove one handler. Returns false if it was already removed.
    pub fn remove_handler(&mut self, registration: HandlerRegistration) -> bool {
        let removed = {
            let mut entries = self.table.entries.borrow_mut();
            let before = entries.len();
            entries.retain(|entry| entry.id != registration.id);
            entries.len() != before
        };

        if removed {
            tracing::debug!(handler = %registration.handler_type, id = registration.id, "Removed handler");
            self.items.on_handler_removed(&RemoveHandlerEvent::new(registration.handler_type));
        }
        removed
    }

    /// Remove every handler, raising one removal notice per handler
    pub fn remove_all_handlers(&mut self) {
        let registrations: Vec<HandlerRegistration> = self
            .table
            .entries
            .borrow()
            .iter()
            .map(|entry| HandlerRegistration {
                id: entry.id,
                handler_type: entry.handler_type,
            })
            .collect();

        for registration in registrations {
            self.remove_handler(registration);
        }
    }

    pub fn handler_count(&self, handler_type: HandlerType) -> usize {
        self.table.handler_count(handler_type)
    }

    /// Call every handler of `handler_type`, returning how many ran
    pub fn fire(&self, handler_type: HandlerType, payload: &P) -> usize {
        self.table.dispatch(handler_type, payload)
    }
}

impl<P: 'static> Default for EventManager<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventManager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("handlers", &self.table.entries.borrow().len())
            .field("items", &self.items)
            .finish()
    }
}
