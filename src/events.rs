//! Lifecycle notifications and the observer list that delivers them.
//!
//! Delivery is synchronous and in registration order. For a focus change the
//! window manager always emits `Blurred` for the previous window before
//! `Focused` for the new one.

use crate::window::{WindowId, WindowState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Opened { id: WindowId, title: String },
    Focused(WindowId),
    Blurred(WindowId),
    StateChanged { id: WindowId, state: WindowState },
    Retitled { id: WindowId, title: String },
    Closed(WindowId),
}

impl WindowEvent {
    pub fn id(&self) -> &WindowId {
        match self {
            WindowEvent::Opened { id, .. }
            | WindowEvent::StateChanged { id, .. }
            | WindowEvent::Retitled { id, .. } => id,
            WindowEvent::Focused(id) | WindowEvent::Blurred(id) | WindowEvent::Closed(id) => id,
        }
    }
}

/// Receives lifecycle notifications.
pub trait WindowObserver {
    fn on_window_event(&mut self, event: &WindowEvent);
}

impl<F: FnMut(&WindowEvent)> WindowObserver for F {
    fn on_window_event(&mut self, event: &WindowEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct EventBus {
    observers: Vec<(SubscriptionId, Box<dyn WindowObserver>)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl WindowObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn emit(&mut self, event: &WindowEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_window_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let first = Rc::clone(&log);
        bus.subscribe(move |e: &WindowEvent| first.borrow_mut().push(("first", e.clone())));
        let second = Rc::clone(&log);
        bus.subscribe(move |e: &WindowEvent| second.borrow_mut().push(("second", e.clone())));

        let id = WindowId::from("notepad-1");
        bus.emit(&WindowEvent::Blurred(id.clone()));
        bus.emit(&WindowEvent::Focused(id.clone()));

        let log = log.borrow();
        let order: Vec<_> = log.iter().map(|(who, e)| (*who, e.clone())).collect();
        assert_eq!(
            order,
            vec![
                ("first", WindowEvent::Blurred(id.clone())),
                ("second", WindowEvent::Blurred(id.clone())),
                ("first", WindowEvent::Focused(id.clone())),
                ("second", WindowEvent::Focused(id)),
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let counter = Rc::clone(&count);
        let sub = bus.subscribe(move |_: &WindowEvent| *counter.borrow_mut() += 1);
        bus.emit(&WindowEvent::Closed(WindowId::from("a-1")));
        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        bus.emit(&WindowEvent::Closed(WindowId::from("a-1")));
        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }
}
