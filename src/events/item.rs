//! Per handler-type listener guards
//!
//! An [`EventItem`] keeps one native listener attached to an emitter while at
//! least one handler of its type is registered:
//!
//! ```text
//! Idle ──(handler added, count >= 1)──► Active   attach_listener(name, proxy)
//! Active ──(handler removed, count == 0)──► Idle  detach_listener(name, proxy)
//! ```
//!
//! Every other notification leaves the item untouched.

use std::rc::Rc;

use super::types::{AddHandlerEvent, HandlerType, RemoveHandlerEvent};

/// An object that native listeners can be attached to by event name
pub trait Emitter {
    type Listener;

    fn attach_listener(&self, event_name: &str, listener: &Self::Listener);

    fn detach_listener(&self, event_name: &str, listener: &Self::Listener);
}

/// Reports how many handlers are registered for a handler type
pub trait HandlerCounter {
    fn handler_count(&self, handler_type: HandlerType) -> usize;
}

/// Receives handler added/removed notifications
pub trait EventListenerGuard {
    fn on_handler_added(&mut self, event: &AddHandlerEvent);

    fn on_handler_removed(&mut self, event: &RemoveHandlerEvent);
}

/// Whether the native listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemState {
    #[default]
    Idle,
    Active,
}

/// Binds one handler type to a native listener on an emitter
pub struct EventItem<M: Emitter> {
    handler_type: HandlerType,
    emitter: Rc<M>,
    name: String,
    counter: Rc<dyn HandlerCounter>,
    listener: M::Listener,
    state: ItemState,
}

impl<M: Emitter> EventItem<M> {
    /// Create an idle item listening under the handler type's native name
    pub fn new(
        handler_type: HandlerType,
        emitter: Rc<M>,
        counter: Rc<dyn HandlerCounter>,
        listener: M::Listener,
    ) -> Self {
        Self::with_name(
            handler_type,
            emitter,
            handler_type.native_name(),
            counter,
            listener,
        )
    }

    /// Create an idle item listening under a custom native event name
    pub fn with_name(
        handler_type: HandlerType,
        emitter: Rc<M>,
        name: impl Into<String>,
        counter: Rc<dyn HandlerCounter>,
        listener: M::Listener,
    ) -> Self {
        Self {
            handler_type,
            emitter,
            name: name.into(),
            counter,
            listener,
            state: ItemState::Idle,
        }
    }

    pub fn handler_type(&self) -> HandlerType {
        self.handler_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ItemState::Active
    }
}

impl<M: Emitter> EventListenerGuard for EventItem<M> {
    fn on_handler_added(&mut self, event: &AddHandlerEvent) {
        if !event.is_recognized(self.handler_type) || self.state == ItemState::Active {
            return;
        }
        if self.counter.handler_count(self.handler_type) >= 1 {
            self.emitter.attach_listener(&self.name, &self.listener);
            self.state = ItemState::Active;
            tracing::debug!(handler = %self.handler_type, event = %self.name, "Attached native listener");
        }
    }

    fn on_handler_removed(&mut self, event: &RemoveHandlerEvent) {
        if !event.is_recognized(self.handler_type) || self.state == ItemState::Idle {
            return;
        }
        if self.counter.handler_count(self.handler_type) == 0 {
            self.emitter.detach_listener(&self.name, &self.listener);
            self.state = ItemState::Idle;
            tracing::debug!(handler = %self.handler_type, event = %self.name, "Detached native listener");
        }
    }
}
