//! ChangeNotifier: synchronous publish/subscribe shared by the domain entities.
//!
//! Entities own one `ChangeNotifier<Self>` and call `notify(self)` after an
//! accepted mutation. Observers run in registration order, on the caller's
//! stack; moving the event to a UI thread is the observer's business.

use std::fmt;

/// Handle returned by [`ChangeNotifier::add_observer`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

pub struct ChangeNotifier<T> {
    observers: Vec<(ObserverId, Callback<T>)>,
    next_id: u64,
}

impl<T> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn add_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Returns false when `id` was never registered or already removed.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn notify(&self, subject: &T) {
        for (_, callback) in &self.observers {
            callback(subject);
        }
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}
