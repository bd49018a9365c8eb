//! Single-owner publish/subscribe cell.
//!
//! Each stateful component (hotspot store, navigator, keyboard, workflow
//! guard) owns one [`Signal`] per piece of published state. The owner is the
//! only writer; everyone else either reads a snapshot or holds a
//! [`tokio::sync::watch::Receiver`].
//!
//! Publication is synchronous: when [`Signal::set`] returns, every
//! subscriber's `borrow()` already observes the new value and
//! `has_changed()` reports `true`. Nothing is queued or deferred.

use tokio::sync::watch;

/// A value with exactly one writer and any number of observers.
#[derive(Debug)]
pub struct Signal<T> {
    tx: watch::Sender<T>,
    version: u64,
}

impl<T: Clone> Signal<T> {
    /// Create a signal holding `initial`.
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx, version: 0 }
    }

    /// Replace the value and notify all subscribers.
    pub fn set(&mut self, value: T) {
        self.tx.send_replace(value);
        self.version += 1;
    }

    /// Mutate the value in place and notify all subscribers.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.tx.send_modify(f);
        self.version += 1;
    }

    /// Clone of the current value.
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Borrow the current value without cloning.
    pub fn borrow(&self) -> watch::Ref<'_, T> {
        self.tx.borrow()
    }

    /// Subscribe to future changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of publications so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
