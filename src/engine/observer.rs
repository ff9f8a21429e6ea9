//! Change notification for display layers.

use std::sync::Arc;

/// Receives a single "state changed" signal after each mutating call.
pub trait Observer: Send + Sync {
    fn update(&self);
}

/// Registered observers, each held at most once (compared by identity).
#[derive(Default)]
pub struct ObserverList {
    observers: Vec<Arc<dyn Observer>>,
}

fn same_observer(a: &Arc<dyn Observer>, b: &Arc<dyn Observer>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `observer` was already registered.
    pub fn add(&mut self, observer: Arc<dyn Observer>) -> bool {
        if self.observers.iter().any(|o| same_observer(o, &observer)) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Returns false if `observer` was not registered.
    pub fn remove(&mut self, observer: &Arc<dyn Observer>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !same_observer(o, observer));
        self.observers.len() != before
    }

    pub fn notify(&self) {
        for observer in &self.observers {
            observer.update();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
