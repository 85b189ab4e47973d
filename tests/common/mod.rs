//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use keybridge::events::{Emitter, EventHandler};
use keybridge::keymap::Stroke;

/// Parse a stroke, panicking on bad input
pub fn stroke(raw: &str) -> Stroke {
    Stroke::parse(raw).unwrap()
}

/// Canonical values of resolved strokes
pub fn values(strokes: &[Stroke]) -> Vec<String> {
    strokes.iter().map(Stroke::value).collect()
}

/// Host editor stand-in that records executed commands
#[derive(Debug, Default)]
pub struct TestEditor {
    pub log: Vec<String>,
}

/// Native emitter stand-in that keeps attached listeners and can emit
#[derive(Default)]
pub struct FakeNativeEditor {
    listeners: RefCell<Vec<(String, EventHandler<String>)>>,
    pub journal: RefCell<Vec<String>>,
}

impl FakeNativeEditor {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn emit(&self, event_name: &str, payload: &str) {
        let listeners: Vec<EventHandler<String>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event_name)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&payload.to_string());
        }
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event_name)
            .count()
    }
}

impl Emitter for FakeNativeEditor {
    type Listener = EventHandler<String>;

    fn attach_listener(&self, event_name: &str, listener: &Self::Listener) {
        self.journal.borrow_mut().push(format!("on {}", event_name));
        self.listeners
            .borrow_mut()
            .push((event_name.to_string(), Rc::clone(listener)));
    }

    fn detach_listener(&self, event_name: &str, listener: &Self::Listener) {
        self.journal.borrow_mut().push(format!("off {}", event_name));
        self.listeners
            .borrow_mut()
            .retain(|(name, l)| !(name == event_name && Rc::ptr_eq(l, listener)));
    }
}
