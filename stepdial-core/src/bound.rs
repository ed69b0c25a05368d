//! Externally owned value holder with an echo guard.
//!
//! Models the other end of a two-way binding: some outside owner keeps the
//! host value, notifies on change, and accepts writes from the binding model.
//! Writes coming from the model are tagged internal so the notification they
//! cause is not fed back into the model as a fresh external change.

use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct BoundValue<V> {
    value: V,
    changed: bool,
    internal_change: bool,
}

impl<V: Copy + PartialEq> BoundValue<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            changed: false,
            internal_change: false,
        }
    }

    pub fn get(&self) -> V {
        self.value
    }

    /// Write from the value's owner. Overrides a pending internal tag.
    pub fn set(&mut self, value: V) {
        if value != self.value {
            self.value = value;
            self.changed = true;
            self.internal_change = false;
        }
    }

    /// Write originating from the binding model.
    pub fn set_internal(&mut self, value: V) {
        if value != self.value {
            self.value = value;
            self.changed = true;
            self.internal_change = true;
        }
    }

    pub fn has_pending_change(&self) -> bool {
        self.changed
    }

    /// Delivers the pending change notification, coalesced to the latest value.
    ///
    /// Returns `None` when nothing changed, and also when the change was the
    /// model's own write; the internal tag is consumed either way.
    pub fn poll_change(&mut self) -> Option<V> {
        if !std::mem::take(&mut self.changed) {
            return None;
        }
        if std::mem::take(&mut self.internal_change) {
            trace!("skipping echo of model write");
            return None;
        }
        Some(self.value)
    }
}
