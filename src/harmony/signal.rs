//! Explicit signal bus for event-triggered rules
//!
//! The caller wires handlers up; nothing in the engine knows about a global
//! channel. Single-threaded by design: signals are discrete user-driven
//! events, handlers run synchronously in registration order.

use ahash::AHashMap;

type Handler = Box<dyn FnMut(&str)>;

/// Named-event dispatch: `signal(name)` runs every handler registered with
/// `on_signal(name, ..)`
#[derive(Default)]
pub struct SignalBus {
    handlers: AHashMap<String, Vec<Handler>>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event name
    pub fn on_signal<F>(&mut self, event: &str, handler: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Fire an event; unknown events dispatch to nobody (not an error)
    pub fn signal(&mut self, event: &str) {
        if let Some(handlers) = self.handlers.get_mut(event) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        } else {
            tracing::debug!(event, "signal with no subscribers");
        }
    }
}

impl std::fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalBus")
            .field("events", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = SignalBus::new();

        let s = seen.clone();
        bus.on_signal("pest_detected", move |_| s.borrow_mut().push("first"));
        let s = seen.clone();
        bus.on_signal("pest_detected", move |_| s.borrow_mut().push("second"));

        bus.signal("pest_detected");
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let mut bus = SignalBus::new();
        bus.signal("never_registered");
    }

    #[test]
    fn test_handler_receives_event_name() {
        let name = Rc::new(RefCell::new(String::new()));
        let mut bus = SignalBus::new();
        let n = name.clone();
        bus.on_signal("frost_warning", move |event| *n.borrow_mut() = event.to_string());
        bus.signal("frost_warning");
        assert_eq!(*name.borrow(), "frost_warning");
    }
}
