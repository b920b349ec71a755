//! Observer registry: an ordered list of change listeners.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use cart_store_core::Items;

/// Handle returned by `on_change`, used to unregister the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&Items) + Send>;

/// Listeners in registration order.
///
/// A listener that panics is logged and skipped; the rest still run and it
/// stays registered.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its handle.
    pub fn register<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&Items) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener. Returns `false` if the handle is unknown.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call every listener with `items`, in registration order.
    pub fn notify(&mut self, items: &Items) {
        for (id, callback) in self.entries.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(items)));
            if outcome.is_err() {
                tracing::error!(listener = ?id, "change listener panicked");
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notify_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();

        for n in 0..3 {
            let log = log.clone();
            listeners.register(move |_| log.lock().unwrap().push(n));
        }

        listeners.notify(&Items::new());
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unregister() {
        let mut listeners = Listeners::new();
        let a = listeners.register(|_| {});
        let b = listeners.register(|_| {});
        assert_ne!(a, b);

        assert!(listeners.unregister(a));
        assert!(!listeners.unregister(a));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let hits = Arc::new(Mutex::new(0));
        let mut listeners = Listeners::new();

        listeners.register(|_| panic!("listener failure"));
        let counter = hits.clone();
        listeners.register(move |_| *counter.lock().unwrap() += 1);

        listeners.notify(&Items::new());
        listeners.notify(&Items::new());

        assert_eq!(*hits.lock().unwrap(), 2);
        assert_eq!(listeners.len(), 2);
    }
}
