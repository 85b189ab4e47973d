//! Event listener multiplexing tests
//!
//! Tests that host handlers share one native listener per handler type.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::FakeNativeEditor;
use keybridge::events::{
    AddHandlerEvent, EventItem, EventItemManager, EventListenerGuard, EventManager, HandlerType,
    ItemState, RemoveHandlerEvent,
};

// ========================================================================
// Single Item Tests
// ========================================================================

#[test]
fn test_change_item_attaches_once_and_detaches_at_zero() {
    let native = FakeNativeEditor::new();
    // the manager only serves as the count oracle; the item is notified by hand
    let mut events = EventManager::<String>::new();
    let mut item = EventItem::new(
        HandlerType::Change,
        Rc::clone(&native),
        events.counter(),
        events.proxy(HandlerType::Change),
    );
    let added = AddHandlerEvent::new(HandlerType::Change);
    let removed = RemoveHandlerEvent::new(HandlerType::Change);

    let h1 = events.add_handler(HandlerType::Change, |_| {});
    item.on_handler_added(&added);
    assert_eq!(item.state(), ItemState::Active);

    let h2 = events.add_handler(HandlerType::Change, |_| {});
    item.on_handler_added(&added);

    events.remove_handler(h1);
    item.on_handler_removed(&removed);
    assert_eq!(item.state(), ItemState::Active);

    events.remove_handler(h2);
    item.on_handler_removed(&removed);
    assert_eq!(item.state(), ItemState::Idle);

    assert_eq!(*native.journal.borrow(), vec!["on change", "off change"]);
}

#[test]
fn test_change_scenario_through_manager() {
    let native = FakeNativeEditor::new();
    let mut events = EventManager::<String>::new();
    events.track(HandlerType::Change, Rc::clone(&native));

    let h1 = events.add_handler(HandlerType::Change, |_| {});
    assert_eq!(*native.journal.borrow(), vec!["on change"]);

    let h2 = events.add_handler(HandlerType::Change, |_| {});
    events.remove_handler(h1);
    assert_eq!(*native.journal.borrow(), vec!["on change"]);

    events.remove_handler(h2);
    assert_eq!(*native.journal.borrow(), vec!["on change", "off change"]);
    assert_eq!(native.listener_count("change"), 0);
}

#[test]
fn test_native_events_reach_every_handler() {
    let native = FakeNativeEditor::new();
    let mut events = EventManager::<String>::new();
    events.track(HandlerType::CursorActivity, Rc::clone(&native));

    let seen = Rc::new(RefCell::new(Vec::new()));
    for tag in ["a", "b"] {
        let seen = Rc::clone(&seen);
        events.add_handler(HandlerType::CursorActivity, move |payload: &String| {
            seen.borrow_mut().push(format!("{}:{}", tag, payload))
        });
    }

    native.emit("cursorActivity", "3:14");
    assert_eq!(*seen.borrow(), vec!["a:3:14", "b:3:14"]);
}

// ========================================================================
// Manager Fan-out Tests
// ========================================================================

#[test]
fn test_three_items_only_matching_one_reacts() {
    let native = FakeNativeEditor::new();
    let mut events = EventManager::<String>::new();
    for handler_type in [HandlerType::Change, HandlerType::CursorActivity, HandlerType::Blur] {
        events.track(handler_type, Rc::clone(&native));
    }
    assert_eq!(events.item_count(), 3);

    let handler = events.add_handler(HandlerType::CursorActivity, |_| {});
    assert_eq!(*native.journal.borrow(), vec!["on cursorActivity"]);
    assert_eq!(native.listener_count("change"), 0);
    assert_eq!(native.listener_count("blur"), 0);

    events.remove_handler(handler);
    assert_eq!(
        *native.journal.borrow(),
        vec!["on cursorActivity", "off cursorActivity"]
    );
}

#[test]
fn test_shared_native_name_types_stay_independent() {
    let native = FakeNativeEditor::new();
    let mut events = EventManager::<String>::new();
    events.track(HandlerType::Change, Rc::clone(&native));
    events.track(HandlerType::DocumentChange, Rc::clone(&native));

    let editor_change = events.add_handler(HandlerType::Change, |_| {});
    events.add_handler(HandlerType::DocumentChange, |_| {});
    assert_eq!(native.listener_count("change"), 2);

    events.remove_handler(editor_change);
    assert_eq!(native.listener_count("change"), 1);
}

#[test]
fn test_bare_item_manager_forwards_in_order() {
    let native = FakeNativeEditor::new();
    let events = EventManager::<String>::new();
    let mut manager = EventItemManager::new();
    for handler_type in [HandlerType::Focus, HandlerType::Blur] {
        manager.add_item(EventItem::new(
            handler_type,
            Rc::clone(&native),
            events.counter(),
            events.proxy(handler_type),
        ));
    }

    // no handlers registered, so the oracle reports zero and nothing attaches
    manager.on_handler_added(&AddHandlerEvent::new(HandlerType::Focus));
    manager.on_handler_removed(&RemoveHandlerEvent::new(HandlerType::Blur));
    assert!(native.journal.borrow().is_empty());
}
